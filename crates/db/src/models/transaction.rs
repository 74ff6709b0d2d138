//! Transaction ledger model.
//!
//! Rows are append-only: created exactly once per (buyer, listing) by the
//! payment completion signal and never updated or deleted. There is no
//! update DTO on purpose.

use roomspec_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `transactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub id: DbId,
    pub buyer_id: DbId,
    pub listing_id: DbId,
    /// Amount paid in minor currency units.
    pub amount: i64,
    pub purchased_at: Timestamp,
}
