//! Repository for the `seller_profiles` table.

use roomspec_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateSellerProfile, SellerProfile, UpdateSellerProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "user_id, payment_account_id, charges_enabled, payouts_enabled, created_at, updated_at";

/// Provides operations for seller payment-onboarding profiles.
pub struct SellerProfileRepo;

impl SellerProfileRepo {
    /// Insert a new seller profile, returning the created row.
    ///
    /// Onboarding flags default to `false` until the payment processor
    /// confirms them.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSellerProfile,
    ) -> Result<SellerProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO seller_profiles (user_id, payment_account_id, charges_enabled, payouts_enabled)
             VALUES ($1, $2, COALESCE($3, FALSE), COALESCE($4, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SellerProfile>(&query)
            .bind(input.user_id)
            .bind(&input.payment_account_id)
            .bind(input.charges_enabled)
            .bind(input.payouts_enabled)
            .fetch_one(pool)
            .await
    }

    /// Find the profile of a seller.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<SellerProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seller_profiles WHERE user_id = $1");
        sqlx::query_as::<_, SellerProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply an onboarding status update from the payment processor.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateSellerProfile,
    ) -> Result<Option<SellerProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE seller_profiles SET
                charges_enabled = COALESCE($2, charges_enabled),
                payouts_enabled = COALESCE($3, payouts_enabled),
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SellerProfile>(&query)
            .bind(user_id)
            .bind(input.charges_enabled)
            .bind(input.payouts_enabled)
            .fetch_optional(pool)
            .await
    }
}
