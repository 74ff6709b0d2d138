//! Handlers for the `/properties` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roomspec_core::entity::EntityRef;
use roomspec_core::error::CoreError;
use roomspec_core::types::DbId;
use roomspec_db::models::property::{CreateProperty, Property, UpdateProperty};
use roomspec_db::repositories::PropertyRepo;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::require_owner;
use crate::state::AppState;

/// POST /api/v1/properties
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProperty>,
) -> AppResult<(StatusCode, Json<Property>)> {
    let property = PropertyRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

/// GET /api/v1/properties -- the caller's own properties.
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Property>>> {
    let properties = PropertyRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(properties))
}

/// GET /api/v1/properties/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Property>> {
    let property = PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Property",
            id,
        }))?;
    Ok(Json(property))
}

/// PUT /api/v1/properties/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProperty>,
) -> AppResult<Json<Property>> {
    require_owner(&state.pool, user.user_id, EntityRef::Property(id)).await?;
    let property = PropertyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Property",
            id,
        }))?;
    Ok(Json(property))
}

/// DELETE /api/v1/properties/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_owner(&state.pool, user.user_id, EntityRef::Property(id)).await?;
    let deleted = PropertyRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Property",
            id,
        }))
    }
}
