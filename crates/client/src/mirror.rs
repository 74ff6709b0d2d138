//! Optimistic purchase mirror.
//!
//! When the user completes a checkout the UI wants to unlock content
//! immediately, before the completion signal has round-tripped through the
//! payment processor and the ledger. The mirror holds those listing ids as
//! advisory state only: reconciliation against the server-side ledger is
//! mandatory, and anything the ledger does not confirm is dropped.

use std::collections::HashSet;
use std::sync::Mutex;

use roomspec_core::types::DbId;

/// Client-side view of the viewer's purchases.
#[derive(Debug, Default)]
pub struct PurchaseMirror {
    /// Checkouts started locally, not yet seen in the ledger.
    optimistic: Mutex<HashSet<DbId>>,
    /// Listing ids confirmed by the last reconciliation.
    confirmed: Mutex<HashSet<DbId>>,
}

impl PurchaseMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note a checkout the user just completed locally.
    pub fn mark_pending(&self, listing_id: DbId) {
        self.optimistic
            .lock()
            .expect("mirror lock poisoned")
            .insert(listing_id);
    }

    /// Advisory: whether the UI may render `listing_id` as unlocked.
    ///
    /// Includes optimistic entries, so this must never feed an actual
    /// access decision; the server re-checks on every content request.
    pub fn is_unlocked(&self, listing_id: DbId) -> bool {
        self.confirmed
            .lock()
            .expect("mirror lock poisoned")
            .contains(&listing_id)
            || self
                .optimistic
                .lock()
                .expect("mirror lock poisoned")
                .contains(&listing_id)
    }

    /// Whether the ledger has confirmed `listing_id`.
    pub fn is_confirmed(&self, listing_id: DbId) -> bool {
        self.confirmed
            .lock()
            .expect("mirror lock poisoned")
            .contains(&listing_id)
    }

    /// Replace the confirmed set with the ledger's listing ids and drop
    /// all optimistic entries, confirmed or not.
    pub fn reconcile(&self, ledger_listing_ids: &[DbId]) {
        let mut confirmed = self.confirmed.lock().expect("mirror lock poisoned");
        confirmed.clear();
        confirmed.extend(ledger_listing_ids.iter().copied());
        self.optimistic
            .lock()
            .expect("mirror lock poisoned")
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_purchase_unlocks_optimistically() {
        let mirror = PurchaseMirror::new();
        assert!(!mirror.is_unlocked(7));

        mirror.mark_pending(7);
        assert!(mirror.is_unlocked(7));
        assert!(!mirror.is_confirmed(7));
    }

    #[test]
    fn test_reconciliation_confirms_ledger_entries() {
        let mirror = PurchaseMirror::new();
        mirror.mark_pending(7);

        mirror.reconcile(&[7, 9]);
        assert!(mirror.is_confirmed(7));
        assert!(mirror.is_confirmed(9));
        assert!(mirror.is_unlocked(7));
    }

    #[test]
    fn test_reconciliation_drops_unconfirmed_optimism() {
        let mirror = PurchaseMirror::new();
        mirror.mark_pending(7);

        // The ledger never saw the purchase (payment failed).
        mirror.reconcile(&[]);
        assert!(!mirror.is_unlocked(7));
        assert!(!mirror.is_confirmed(7));
    }

    #[test]
    fn test_reconciliation_replaces_previous_confirmations() {
        let mirror = PurchaseMirror::new();
        mirror.reconcile(&[3]);
        assert!(mirror.is_confirmed(3));

        mirror.reconcile(&[4]);
        assert!(!mirror.is_confirmed(3));
        assert!(mirror.is_confirmed(4));
    }
}
