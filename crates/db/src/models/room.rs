//! Room entity model and DTOs.

use roomspec_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub property_id: DbId,
    pub name: String,
    pub floor_area_sqm: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new room.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoom {
    pub property_id: DbId,
    pub name: String,
    pub floor_area_sqm: Option<f64>,
}

/// DTO for updating an existing room. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoom {
    pub name: Option<String>,
    pub floor_area_sqm: Option<f64>,
}
