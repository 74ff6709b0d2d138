//! Repository for the `listings` table: creation, lifecycle transitions,
//! and covering-listing lookup.
//!
//! Transitions are applied with a guarded `UPDATE ... WHERE status = $from`
//! so a disallowed or concurrently invalidated transition changes nothing
//! and surfaces as `StateTransition`.

use roomspec_core::error::CoreError;
use roomspec_core::listing::{ListingScope, ListingStatus, ListingType};
use roomspec_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoError;
use crate::models::listing::{CreateListing, Listing, UpdateListing};
use crate::repositories::SellerProfileRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, seller_id, listing_type, status, title, price, \
                       property_id, room_id, product_id, created_at, updated_at";

/// Provides lifecycle operations for listings.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new draft listing for `seller_id`, returning the created row.
    ///
    /// The target reference shape is validated against the listing type
    /// before the insert; the same rule is backed by a CHECK constraint.
    pub async fn create(
        pool: &PgPool,
        seller_id: DbId,
        input: &CreateListing,
    ) -> Result<Listing, RepoError> {
        let listing_type = ListingType::from_str_value(&input.listing_type)?;
        let scope = ListingScope::from_parts(
            listing_type,
            input.property_id,
            input.room_id,
            input.product_id,
        )?;

        let query = format!(
            "INSERT INTO listings (seller_id, listing_type, status, title, price,
                                   property_id, room_id, product_id)
             VALUES ($1, $2, 'draft', $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let listing = sqlx::query_as::<_, Listing>(&query)
            .bind(seller_id)
            .bind(scope.listing_type().as_str())
            .bind(&input.title)
            .bind(input.price)
            .bind(input.property_id)
            .bind(input.room_id)
            .bind(input.product_id)
            .fetch_one(pool)
            .await?;
        tracing::info!(listing_id = listing.id, seller_id, "Listing created as draft");
        Ok(listing)
    }

    /// Find a listing by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all listings of a seller, most recently created first.
    pub async fn list_by_seller(
        pool: &PgPool,
        seller_id: DbId,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM listings WHERE seller_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Listing>(&query)
            .bind(seller_id)
            .fetch_all(pool)
            .await
    }

    /// All listings targeting any entity under `property_id` (the property
    /// itself, its rooms, or its products).
    ///
    /// These are the coverage candidates for any target inside the
    /// property; the core's coverage filter picks the applicable ones and
    /// orders them finest first.
    pub async fn list_for_property(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM listings
             WHERE property_id = $1
                OR room_id IN (SELECT id FROM rooms WHERE property_id = $1)
                OR product_id IN (
                    SELECT p.id FROM products p
                    JOIN rooms r ON r.id = p.room_id
                    WHERE r.property_id = $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(property_id)
            .fetch_all(pool)
            .await
    }

    /// Update a listing's descriptive fields. Drafts only; a listing that
    /// has been published is immutable apart from its status.
    pub async fn update_draft(
        pool: &PgPool,
        id: DbId,
        input: &UpdateListing,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET
                title = COALESCE($2, title),
                price = COALESCE($3, price),
                updated_at = NOW()
             WHERE id = $1 AND status = 'draft'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.price)
            .fetch_optional(pool)
            .await
    }

    /// Publish a draft listing.
    ///
    /// Requires the seller's payment onboarding to be complete; fails with
    /// `StateTransition` if the listing is not currently a draft.
    pub async fn publish(pool: &PgPool, id: DbId) -> Result<Listing, RepoError> {
        let listing = Self::require(pool, id).await?;
        let profile = SellerProfileRepo::find_by_user(pool, listing.seller_id)
            .await?
            .ok_or(CoreError::Validation(
                "Seller has no payment onboarding profile".to_string(),
            ))?;
        profile.onboarding().check_may_publish()?;
        Self::transition(pool, id, ListingStatus::Published).await
    }

    /// Reserve a published listing.
    pub async fn reserve(pool: &PgPool, id: DbId) -> Result<Listing, RepoError> {
        Self::transition(pool, id, ListingStatus::Reserved).await
    }

    /// Cancel a published or reserved listing.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Listing, RepoError> {
        Self::transition(pool, id, ListingStatus::Cancelled).await
    }

    /// Mark a published or reserved listing sold.
    pub async fn complete(pool: &PgPool, id: DbId) -> Result<Listing, RepoError> {
        Self::transition(pool, id, ListingStatus::Sold).await
    }

    /// Apply one status transition, leaving the row unchanged on any
    /// disallowed move.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        to: ListingStatus,
    ) -> Result<Listing, RepoError> {
        let listing = Self::require(pool, id).await?;
        let from = listing.status_value()?;
        from.transition_to(to)?;

        let query = format!(
            "UPDATE listings SET status = $3, updated_at = NOW()
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(pool)
            .await?;

        match updated {
            Some(listing) => {
                tracing::info!(
                    listing_id = id,
                    from = from.as_str(),
                    to = to.as_str(),
                    "Listing status transition"
                );
                Ok(listing)
            }
            // The status moved underneath us between the read and the
            // guarded update; report against the current state.
            None => {
                let current = Self::require(pool, id).await?;
                Err(RepoError::Core(CoreError::StateTransition {
                    entity: "Listing",
                    from: current.status_value()?.as_str(),
                    to: to.as_str(),
                }))
            }
        }
    }

    async fn require(pool: &PgPool, id: DbId) -> Result<Listing, RepoError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or(RepoError::Core(CoreError::NotFound {
                entity: "Listing",
                id,
            }))
    }
}
