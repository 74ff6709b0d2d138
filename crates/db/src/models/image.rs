//! Image attachment model and DTOs.
//!
//! Image records are produced by the external storage/upload pipeline and
//! only read here. Exactly one parent column is set per row; the database
//! enforces this with a CHECK constraint and [`Image::parent_ref`] is the
//! typed accessor.

use roomspec_core::entity::EntityRef;
use roomspec_core::error::CoreError;
use roomspec_core::image::{attachment_parent, ImageStatus, ImageType};
use roomspec_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub url: String,
    /// `main`, `sub`, or `paid`.
    pub image_type: String,
    /// `pending` until the upload pipeline finalizes the file.
    pub status: String,
    pub property_id: Option<DbId>,
    pub room_id: Option<DbId>,
    pub product_id: Option<DbId>,
    pub product_specification_id: Option<DbId>,
    pub drawing_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Image {
    /// The single entity this image is attached to.
    pub fn parent_ref(&self) -> Result<EntityRef, CoreError> {
        attachment_parent(
            self.property_id,
            self.room_id,
            self.product_id,
            self.product_specification_id,
            self.drawing_id,
        )
    }

    pub fn image_type_value(&self) -> Result<ImageType, CoreError> {
        ImageType::from_str_value(&self.image_type)
    }

    pub fn status_value(&self) -> Result<ImageStatus, CoreError> {
        ImageStatus::from_str_value(&self.status)
    }
}

/// DTO for registering a finalized upload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateImage {
    pub url: String,
    pub image_type: String,
    /// Defaults to `pending` if omitted.
    pub status: Option<String>,
    pub property_id: Option<DbId>,
    pub room_id: Option<DbId>,
    pub product_id: Option<DbId>,
    pub product_specification_id: Option<DbId>,
    pub drawing_id: Option<DbId>,
}

/// DTO for updating an image (status flips when the pipeline completes).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateImage {
    pub url: Option<String>,
    pub image_type: Option<String>,
    pub status: Option<String>,
}
