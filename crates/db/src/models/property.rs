//! Property entity model and DTOs. Root of the content hierarchy.

use roomspec_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `properties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: DbId,
    /// Owning user; grants transitive control over the whole subtree.
    pub user_id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new property. The owner comes from the caller's
/// identity, not the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProperty {
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating an existing property. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProperty {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}
