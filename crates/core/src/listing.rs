//! Listing types, target scopes, and the sale-status state machine.
//!
//! A listing sells access to one slice of the hierarchy (a whole property's
//! specifications, one room's, or one product's) or a service (consultation,
//! property viewing). The target reference is a tagged variant so that shape
//! validation and scope comparison are exhaustive matches rather than
//! nullable-column conventions.

use serde::{Deserialize, Serialize};

use crate::entity::EntityRef;
use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Status values stored in the `listings.status` column.
pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_RESERVED: &str = "reserved";
pub const STATUS_SOLD: &str = "sold";
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid listing status strings.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_PUBLISHED,
    STATUS_RESERVED,
    STATUS_SOLD,
    STATUS_CANCELLED,
];

// ---------------------------------------------------------------------------
// ListingStatus
// ---------------------------------------------------------------------------

/// The sale status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Draft,
    Published,
    Reserved,
    Sold,
    Cancelled,
}

impl ListingStatus {
    /// Convert from the database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_PUBLISHED => Ok(Self::Published),
            STATUS_RESERVED => Ok(Self::Reserved),
            STATUS_SOLD => Ok(Self::Sold),
            STATUS_CANCELLED => Ok(Self::Cancelled),
            _ => Err(CoreError::Validation(format!(
                "Invalid listing status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// The database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::Published => STATUS_PUBLISHED,
            Self::Reserved => STATUS_RESERVED,
            Self::Sold => STATUS_SOLD,
            Self::Cancelled => STATUS_CANCELLED,
        }
    }

    /// Whether the lifecycle table allows moving from `self` to `next`.
    ///
    /// DRAFT → PUBLISHED; PUBLISHED → RESERVED | SOLD | CANCELLED;
    /// RESERVED → SOLD | CANCELLED. SOLD and CANCELLED are terminal.
    pub fn can_transition_to(&self, next: ListingStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Published)
                | (Self::Published, Self::Reserved)
                | (Self::Published, Self::Sold)
                | (Self::Published, Self::Cancelled)
                | (Self::Reserved, Self::Sold)
                | (Self::Reserved, Self::Cancelled)
        )
    }

    /// Validate a transition, producing the `StateTransitionError` the
    /// registry surfaces for disallowed moves.
    pub fn transition_to(&self, next: ListingStatus) -> Result<ListingStatus, CoreError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::StateTransition {
                entity: "Listing",
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }

    /// Whether content behind this listing may be offered to non-owners at
    /// all. Only published and reserved listings are previewable.
    pub fn is_offerable(&self) -> bool {
        matches!(self, Self::Published | Self::Reserved)
    }
}

// ---------------------------------------------------------------------------
// ListingType
// ---------------------------------------------------------------------------

/// Type values stored in the `listings.listing_type` column.
pub const TYPE_PROPERTY_SPECS: &str = "property_specs";
pub const TYPE_ROOM_SPECS: &str = "room_specs";
pub const TYPE_PRODUCT_SPECS: &str = "product_specs";
pub const TYPE_CONSULTATION: &str = "consultation";
pub const TYPE_PROPERTY_VIEWING: &str = "property_viewing";

/// All valid listing type strings.
pub const VALID_TYPES: &[&str] = &[
    TYPE_PROPERTY_SPECS,
    TYPE_ROOM_SPECS,
    TYPE_PRODUCT_SPECS,
    TYPE_CONSULTATION,
    TYPE_PROPERTY_VIEWING,
];

/// What a listing sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    PropertySpecs,
    RoomSpecs,
    ProductSpecs,
    Consultation,
    PropertyViewing,
}

impl ListingType {
    /// Convert from the database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            TYPE_PROPERTY_SPECS => Ok(Self::PropertySpecs),
            TYPE_ROOM_SPECS => Ok(Self::RoomSpecs),
            TYPE_PRODUCT_SPECS => Ok(Self::ProductSpecs),
            TYPE_CONSULTATION => Ok(Self::Consultation),
            TYPE_PROPERTY_VIEWING => Ok(Self::PropertyViewing),
            _ => Err(CoreError::Validation(format!(
                "Invalid listing type '{s}'. Must be one of: {}",
                VALID_TYPES.join(", ")
            ))),
        }
    }

    /// The database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PropertySpecs => TYPE_PROPERTY_SPECS,
            Self::RoomSpecs => TYPE_ROOM_SPECS,
            Self::ProductSpecs => TYPE_PRODUCT_SPECS,
            Self::Consultation => TYPE_CONSULTATION,
            Self::PropertyViewing => TYPE_PROPERTY_VIEWING,
        }
    }

    /// Whether this type sells specification access (as opposed to a
    /// one-off service). Only spec types participate in purchase coverage.
    pub fn is_specs(&self) -> bool {
        matches!(
            self,
            Self::PropertySpecs | Self::RoomSpecs | Self::ProductSpecs
        )
    }
}

// ---------------------------------------------------------------------------
// ListingScope
// ---------------------------------------------------------------------------

/// A listing's type together with its validated target reference.
///
/// Exactly one target id is ever set and it always matches the listing
/// type; constructing a scope through [`ListingScope::from_parts`] is the
/// only path from raw columns, so downstream matching is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "listing_type", rename_all = "snake_case")]
pub enum ListingScope {
    PropertySpecs { property_id: DbId },
    RoomSpecs { room_id: DbId },
    ProductSpecs { product_id: DbId },
    Consultation { property_id: DbId },
    PropertyViewing { property_id: DbId },
}

impl ListingScope {
    /// Assemble a scope from the raw (type, nullable target id) columns,
    /// rejecting any shape that does not match the listing type.
    pub fn from_parts(
        listing_type: ListingType,
        property_id: Option<DbId>,
        room_id: Option<DbId>,
        product_id: Option<DbId>,
    ) -> Result<Self, CoreError> {
        let scope = match (listing_type, property_id, room_id, product_id) {
            (ListingType::PropertySpecs, Some(property_id), None, None) => {
                Self::PropertySpecs { property_id }
            }
            (ListingType::RoomSpecs, None, Some(room_id), None) => Self::RoomSpecs { room_id },
            (ListingType::ProductSpecs, None, None, Some(product_id)) => {
                Self::ProductSpecs { product_id }
            }
            (ListingType::Consultation, Some(property_id), None, None) => {
                Self::Consultation { property_id }
            }
            (ListingType::PropertyViewing, Some(property_id), None, None) => {
                Self::PropertyViewing { property_id }
            }
            (listing_type, _, _, _) => {
                return Err(CoreError::Validation(format!(
                    "Target reference does not match listing type '{}': exactly the \
                     matching target id must be set",
                    listing_type.as_str()
                )))
            }
        };
        Ok(scope)
    }

    pub fn listing_type(&self) -> ListingType {
        match self {
            Self::PropertySpecs { .. } => ListingType::PropertySpecs,
            Self::RoomSpecs { .. } => ListingType::RoomSpecs,
            Self::ProductSpecs { .. } => ListingType::ProductSpecs,
            Self::Consultation { .. } => ListingType::Consultation,
            Self::PropertyViewing { .. } => ListingType::PropertyViewing,
        }
    }

    /// The entity the listing points at.
    pub fn target_ref(&self) -> EntityRef {
        match *self {
            Self::PropertySpecs { property_id }
            | Self::Consultation { property_id }
            | Self::PropertyViewing { property_id } => EntityRef::Property(property_id),
            Self::RoomSpecs { room_id } => EntityRef::Room(room_id),
            Self::ProductSpecs { product_id } => EntityRef::Product(product_id),
        }
    }

    /// Ordering key for "finest scope first": product before room before
    /// property, with service listings last.
    pub fn granularity(&self) -> u8 {
        match self {
            Self::ProductSpecs { .. } => 0,
            Self::RoomSpecs { .. } => 1,
            Self::PropertySpecs { .. } => 2,
            Self::Consultation { .. } | Self::PropertyViewing { .. } => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Seller onboarding
// ---------------------------------------------------------------------------

/// Payment-processor onboarding flags for a seller.
///
/// Both flags must be set before the seller may publish a listing; the
/// flags themselves come from the external payment processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerOnboarding {
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
}

impl SellerOnboarding {
    pub fn may_publish(&self) -> bool {
        self.charges_enabled && self.payouts_enabled
    }

    /// Validate publishing eligibility, erroring with the reason.
    pub fn check_may_publish(&self) -> Result<(), CoreError> {
        if self.may_publish() {
            Ok(())
        } else {
            Err(CoreError::Validation(
                "Seller has not completed payment onboarding (charges and payouts \
                 must both be enabled)"
                    .to_string(),
            ))
        }
    }
}
