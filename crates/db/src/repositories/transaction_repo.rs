//! Repository for the `transactions` ledger.
//!
//! The ledger is append-only and is the sole source of truth for "is this
//! unlocked for this buyer". Duplicate completion signals (webhook
//! redelivery, double-submit) converge on the one existing row via the
//! `uq_transactions_buyer_listing` unique constraint checked atomically at
//! insert time.

use roomspec_core::coverage::scope_covers;
use roomspec_core::entity::EntityRef;
use roomspec_core::error::CoreError;
use roomspec_core::listing::ListingScope;
use roomspec_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoError;
use crate::models::transaction::Transaction;
use crate::repositories::GraphRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, buyer_id, listing_id, amount, purchased_at";

/// Provides append and read operations for the purchase ledger.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Record a completed purchase. Idempotent: if a transaction for
    /// (buyer, listing) already exists the existing row is returned
    /// unchanged and nothing is inserted.
    ///
    /// The flag reports whether this call inserted the row. It is the only
    /// race-free way to tell first delivery from redelivery: a separate
    /// existence read before the insert can miss a concurrent completion.
    pub async fn record_purchase(
        pool: &PgPool,
        buyer_id: DbId,
        listing_id: DbId,
        amount: i64,
    ) -> Result<(Transaction, bool), RepoError> {
        let query = format!(
            "INSERT INTO transactions (buyer_id, listing_id, amount)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_transactions_buyer_listing DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Transaction>(&query)
            .bind(buyer_id)
            .bind(listing_id)
            .bind(amount)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(transaction) => {
                tracing::info!(
                    transaction_id = transaction.id,
                    buyer_id,
                    listing_id,
                    amount,
                    "Purchase recorded"
                );
                Ok((transaction, true))
            }
            None => {
                tracing::debug!(
                    buyer_id,
                    listing_id,
                    "Duplicate purchase completion suppressed"
                );
                let existing = Self::find_by_buyer_and_listing(pool, buyer_id, listing_id)
                    .await?
                    .ok_or(RepoError::Core(CoreError::Internal(format!(
                        "Transaction for buyer {buyer_id} and listing {listing_id} \
                         vanished after conflict"
                    ))))?;
                Ok((existing, false))
            }
        }
    }

    /// The transaction for one (buyer, listing) pair, if any.
    pub async fn find_by_buyer_and_listing(
        pool: &PgPool,
        buyer_id: DbId,
        listing_id: DbId,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM transactions WHERE buyer_id = $1 AND listing_id = $2");
        sqlx::query_as::<_, Transaction>(&query)
            .bind(buyer_id)
            .bind(listing_id)
            .fetch_optional(pool)
            .await
    }

    /// A buyer's purchase history, most recent first.
    pub async fn history_for(
        pool: &PgPool,
        buyer_id: DbId,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions WHERE buyer_id = $1 ORDER BY purchased_at DESC"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(buyer_id)
            .fetch_all(pool)
            .await
    }

    /// The validated scopes of every listing the buyer has purchased.
    pub async fn purchased_scopes(
        pool: &PgPool,
        buyer_id: DbId,
    ) -> Result<Vec<ListingScope>, RepoError> {
        let rows: Vec<(String, Option<DbId>, Option<DbId>, Option<DbId>)> = sqlx::query_as(
            "SELECT l.listing_type, l.property_id, l.room_id, l.product_id
             FROM transactions t
             JOIN listings l ON l.id = t.listing_id
             WHERE t.buyer_id = $1
             ORDER BY t.id",
        )
        .bind(buyer_id)
        .fetch_all(pool)
        .await?;

        let mut scopes = Vec::with_capacity(rows.len());
        for (listing_type, property_id, room_id, product_id) in rows {
            let listing_type = roomspec_core::listing::ListingType::from_str_value(&listing_type)?;
            scopes.push(ListingScope::from_parts(
                listing_type,
                property_id,
                room_id,
                product_id,
            )?);
        }
        Ok(scopes)
    }

    /// Whether any of the buyer's transactions transitively covers `target`.
    pub async fn is_purchased(
        pool: &PgPool,
        buyer_id: DbId,
        target: EntityRef,
    ) -> Result<bool, RepoError> {
        let property_id = GraphRepo::ancestor_property(pool, target).await?;
        let graph = GraphRepo::load_property_graph(pool, property_id).await?;
        let scopes = Self::purchased_scopes(pool, buyer_id).await?;
        for scope in &scopes {
            if scope_covers(&graph, scope, target)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
