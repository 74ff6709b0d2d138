//! User and seller profile models and DTOs.
//!
//! Authentication is external; users here are the opaque ids the identity
//! provider hands us, plus the marketplace-facing role and the seller's
//! payment-processor onboarding state.

use roomspec_core::listing::SellerOnboarding;
use roomspec_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub display_name: String,
    /// `buyer`, `seller`, or `both`.
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub display_name: String,
    pub role: String,
}

/// A row from the `seller_profiles` table.
///
/// The onboarding flags mirror the external payment processor's account
/// state and gate listing publication.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SellerProfile {
    pub user_id: DbId,
    /// Account id at the external payment processor.
    pub payment_account_id: String,
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SellerProfile {
    /// The onboarding flags as the core's publish-gate type.
    pub fn onboarding(&self) -> SellerOnboarding {
        SellerOnboarding {
            charges_enabled: self.charges_enabled,
            payouts_enabled: self.payouts_enabled,
        }
    }
}

/// DTO for creating a seller profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSellerProfile {
    pub user_id: DbId,
    pub payment_account_id: String,
    pub charges_enabled: Option<bool>,
    pub payouts_enabled: Option<bool>,
}

/// DTO for onboarding status updates pushed by the payment processor.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSellerProfile {
    pub charges_enabled: Option<bool>,
    pub payouts_enabled: Option<bool>,
}
