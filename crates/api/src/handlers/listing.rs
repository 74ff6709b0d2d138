//! Handlers for the `/listings` resource and its lifecycle actions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roomspec_core::error::CoreError;
use roomspec_core::types::DbId;
use roomspec_db::models::listing::{CreateListing, Listing, UpdateListing};
use roomspec_db::repositories::ListingRepo;
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::require_owner;
use crate::state::AppState;

/// POST /api/v1/listings -- always created as a draft.
///
/// Spec-type listings may only target content the seller owns.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateListing>,
) -> AppResult<(StatusCode, Json<Listing>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    // Validate the target shape up front so the ownership check gates the
    // real target, then let the repository re-validate on insert.
    let listing_type = roomspec_core::listing::ListingType::from_str_value(&input.listing_type)?;
    let scope = roomspec_core::listing::ListingScope::from_parts(
        listing_type,
        input.property_id,
        input.room_id,
        input.product_id,
    )?;
    require_owner(&state.pool, user.user_id, scope.target_ref()).await?;

    let listing = ListingRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// GET /api/v1/listings -- the caller's own listings.
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Listing>>> {
    let listings = ListingRepo::list_by_seller(&state.pool, user.user_id).await?;
    Ok(Json(listings))
}

/// GET /api/v1/listings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Listing>> {
    let listing = ListingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;
    Ok(Json(listing))
}

/// PUT /api/v1/listings/{id} -- drafts only.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateListing>,
) -> AppResult<Json<Listing>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    require_seller(&state.pool, user.user_id, id).await?;
    let listing = ListingRepo::update_draft(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::Validation(
            "Only draft listings can be edited".to_string(),
        )))?;
    Ok(Json(listing))
}

/// POST /api/v1/listings/{id}/publish
pub async fn publish(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Listing>> {
    require_seller(&state.pool, user.user_id, id).await?;
    let listing = ListingRepo::publish(&state.pool, id).await?;
    Ok(Json(listing))
}

/// POST /api/v1/listings/{id}/reserve
pub async fn reserve(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Listing>> {
    require_seller(&state.pool, user.user_id, id).await?;
    let listing = ListingRepo::reserve(&state.pool, id).await?;
    Ok(Json(listing))
}

/// POST /api/v1/listings/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Listing>> {
    require_seller(&state.pool, user.user_id, id).await?;
    let listing = ListingRepo::cancel(&state.pool, id).await?;
    Ok(Json(listing))
}

/// Lifecycle actions are reserved for the listing's seller.
async fn require_seller(
    pool: &roomspec_db::DbPool,
    user_id: DbId,
    listing_id: DbId,
) -> Result<(), AppError> {
    let listing = ListingRepo::find_by_id(pool, listing_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        }))?;
    if listing.seller_id != user_id {
        return Err(AppError::Core(CoreError::Ownership(format!(
            "User {user_id} is not the seller of listing {listing_id}"
        ))));
    }
    Ok(())
}
