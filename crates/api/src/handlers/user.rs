//! Handlers for users and seller payment-onboarding profiles.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roomspec_core::error::CoreError;
use roomspec_core::types::DbId;
use roomspec_db::models::user::{
    CreateSellerProfile, CreateUser, SellerProfile, UpdateSellerProfile, User,
};
use roomspec_db::repositories::{SellerProfileRepo, UserRepo};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = UserRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// POST /api/v1/seller-profile -- the caller's own profile.
pub async fn create_seller_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateSellerProfile>,
) -> AppResult<(StatusCode, Json<SellerProfile>)> {
    // The profile belongs to the caller regardless of the body.
    input.user_id = user.user_id;
    let profile = SellerProfileRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/v1/seller-profile
pub async fn get_seller_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<SellerProfile>> {
    let profile = SellerProfileRepo::find_by_user(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SellerProfile",
            id: user.user_id,
        }))?;
    Ok(Json(profile))
}

/// PUT /api/v1/seller-profile -- onboarding flags from the payment processor.
pub async fn update_seller_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateSellerProfile>,
) -> AppResult<Json<SellerProfile>> {
    let profile = SellerProfileRepo::update(&state.pool, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SellerProfile",
            id: user.user_id,
        }))?;
    Ok(Json(profile))
}
