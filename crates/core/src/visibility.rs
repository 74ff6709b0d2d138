//! The visibility cascade.
//!
//! `decide` is the single pure function classifying any (viewer, content,
//! field) triple as visible, blurred, or hidden. The caller resolves the
//! viewer-specific facts (ownership, the most specific covering listing's
//! status, purchase coverage) into a [`VisibilityContext`] first; the
//! cascade itself touches no storage.

use serde::{Deserialize, Serialize};

use crate::image::ImageType;
use crate::listing::ListingStatus;

/// Whether a field is free to everyone or part of the paid content.
///
/// Public fields are the identifying basics: title, name, thumbnail.
/// Everything else (specification values, dimensions, paid imagery) is
/// premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldClass {
    Public,
    Premium,
}

impl FieldClass {
    pub fn from_str_value(s: &str) -> Result<Self, crate::error::CoreError> {
        match s {
            "public" => Ok(Self::Public),
            "premium" => Ok(Self::Premium),
            _ => Err(crate::error::CoreError::Validation(format!(
                "Invalid field class '{s}'. Must be 'public' or 'premium'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Premium => "premium",
        }
    }
}

/// How a piece of content renders for a given viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    Blurred,
    Hidden,
}

/// Viewer-specific facts the cascade evaluates, resolved by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityContext {
    /// The viewer owns the target's root property.
    pub viewer_is_owner: bool,
    /// Status of the most specific listing covering the target, or `None`
    /// when no listing covers it at all.
    pub covering_listing_status: Option<ListingStatus>,
    /// The viewer has a ledger transaction whose scope covers the target.
    pub purchased: bool,
}

/// Classify content for a viewer. Ordered cascade, first match wins:
///
/// 1. Public fields are always visible.
/// 2. Owners always see their own data.
/// 3. Without a covering listing in PUBLISHED or RESERVED status the
///    content is hidden outright; withdrawn, unpublished, and unoffered
///    content is not previewable.
/// 4. A MAIN image on offerable content is the teaser and stays visible
///    without a purchase.
/// 5. Purchased coverage reveals the content.
/// 6. Otherwise the content renders obscured.
///
/// For non-image content pass `image_type = None`.
pub fn decide(
    ctx: &VisibilityContext,
    field_class: FieldClass,
    image_type: Option<ImageType>,
) -> Visibility {
    if field_class == FieldClass::Public {
        return Visibility::Visible;
    }
    if ctx.viewer_is_owner {
        return Visibility::Visible;
    }
    match ctx.covering_listing_status {
        Some(status) if status.is_offerable() => {}
        _ => return Visibility::Hidden,
    }
    if image_type == Some(ImageType::Main) {
        return Visibility::Visible;
    }
    if ctx.purchased {
        return Visibility::Visible;
    }
    Visibility::Blurred
}
