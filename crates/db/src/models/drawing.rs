//! Drawing entity model and DTOs (property-level floor plans and similar
//! documents).

use roomspec_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `drawings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Drawing {
    pub id: DbId,
    pub property_id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new drawing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDrawing {
    pub property_id: DbId,
    pub title: String,
}

/// DTO for updating an existing drawing.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDrawing {
    pub title: Option<String>,
}
