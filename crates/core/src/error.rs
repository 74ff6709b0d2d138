//! Domain error taxonomy.
//!
//! Shared across the db and api layers. HTTP mapping lives in the api
//! crate's `AppError`; this type stays transport-agnostic.

use crate::types::DbId;

/// A domain-level error.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity referenced by id does not exist (including dangling
    /// parent links discovered during ancestry resolution).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed domain validation (e.g. a listing target whose shape
    /// does not match its listing type).
    #[error("{0}")]
    Validation(String),

    /// An owner-only action was attempted by a non-owner.
    #[error("{0}")]
    Ownership(String),

    /// A listing status transition not allowed by the lifecycle table.
    /// The entity is left unchanged.
    #[error("{entity} cannot transition from '{from}' to '{to}'")]
    StateTransition {
        entity: &'static str,
        from: &'static str,
        to: &'static str,
    },

    /// An unexpected internal failure.
    #[error("{0}")]
    Internal(String),
}
