//! Image attachment types and the single-parent invariant.

use serde::{Deserialize, Serialize};

use crate::entity::EntityRef;
use crate::error::CoreError;
use crate::types::DbId;

/// Type values stored in the `images.image_type` column.
pub const IMAGE_TYPE_MAIN: &str = "main";
pub const IMAGE_TYPE_SUB: &str = "sub";
pub const IMAGE_TYPE_PAID: &str = "paid";

/// All valid image type strings.
pub const VALID_IMAGE_TYPES: &[&str] = &[IMAGE_TYPE_MAIN, IMAGE_TYPE_SUB, IMAGE_TYPE_PAID];

/// Status values stored in the `images.status` column.
pub const IMAGE_STATUS_PENDING: &str = "pending";
pub const IMAGE_STATUS_COMPLETED: &str = "completed";

/// How an image participates in gating.
///
/// MAIN images are the listing teaser and stay visible on published
/// listings even without a purchase; SUB and PAID images follow the full
/// cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageType {
    Main,
    Sub,
    Paid,
}

impl ImageType {
    /// Convert from the database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            IMAGE_TYPE_MAIN => Ok(Self::Main),
            IMAGE_TYPE_SUB => Ok(Self::Sub),
            IMAGE_TYPE_PAID => Ok(Self::Paid),
            _ => Err(CoreError::Validation(format!(
                "Invalid image type '{s}'. Must be one of: {}",
                VALID_IMAGE_TYPES.join(", ")
            ))),
        }
    }

    /// The database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => IMAGE_TYPE_MAIN,
            Self::Sub => IMAGE_TYPE_SUB,
            Self::Paid => IMAGE_TYPE_PAID,
        }
    }
}

/// Upload status of an image produced by the external storage pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    Pending,
    Completed,
}

impl ImageStatus {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            IMAGE_STATUS_PENDING => Ok(Self::Pending),
            IMAGE_STATUS_COMPLETED => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid image status '{s}'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => IMAGE_STATUS_PENDING,
            Self::Completed => IMAGE_STATUS_COMPLETED,
        }
    }
}

/// Resolve the single attachment parent of an image from its nullable
/// parent columns, rejecting zero or multiple set ids.
pub fn attachment_parent(
    property_id: Option<DbId>,
    room_id: Option<DbId>,
    product_id: Option<DbId>,
    product_specification_id: Option<DbId>,
    drawing_id: Option<DbId>,
) -> Result<EntityRef, CoreError> {
    let set: Vec<EntityRef> = [
        property_id.map(EntityRef::Property),
        room_id.map(EntityRef::Room),
        product_id.map(EntityRef::Product),
        product_specification_id.map(EntityRef::Specification),
        drawing_id.map(EntityRef::Drawing),
    ]
    .into_iter()
    .flatten()
    .collect();

    match set.as_slice() {
        [parent] => Ok(*parent),
        [] => Err(CoreError::Validation(
            "Image must be attached to exactly one parent entity; none set".to_string(),
        )),
        _ => Err(CoreError::Validation(format!(
            "Image must be attached to exactly one parent entity; {} set",
            set.len()
        ))),
    }
}
