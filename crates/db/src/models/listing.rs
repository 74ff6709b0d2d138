//! Listing entity model and DTOs.

use roomspec_core::error::CoreError;
use roomspec_core::listing::{ListingScope, ListingStatus, ListingType};
use roomspec_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `listings` table.
///
/// The raw (listing_type, nullable target) columns always satisfy the
/// shape CHECK constraint; [`Listing::scope`] re-assembles them into the
/// tagged core variant for exhaustive matching.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub seller_id: DbId,
    pub listing_type: String,
    pub status: String,
    pub title: String,
    /// Price in minor currency units.
    pub price: i64,
    pub property_id: Option<DbId>,
    pub room_id: Option<DbId>,
    pub product_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Listing {
    /// The validated type-plus-target scope of this listing.
    pub fn scope(&self) -> Result<ListingScope, CoreError> {
        let listing_type = ListingType::from_str_value(&self.listing_type)?;
        ListingScope::from_parts(
            listing_type,
            self.property_id,
            self.room_id,
            self.product_id,
        )
    }

    pub fn status_value(&self) -> Result<ListingStatus, CoreError> {
        ListingStatus::from_str_value(&self.status)
    }
}

/// DTO for creating a new listing. The seller comes from the caller's
/// identity, not the body; listings always start as drafts.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateListing {
    pub listing_type: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(range(min = 0))]
    pub price: i64,
    pub property_id: Option<DbId>,
    pub room_id: Option<DbId>,
    pub product_id: Option<DbId>,
}

/// DTO for updating a draft listing's descriptive fields.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateListing {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
}
