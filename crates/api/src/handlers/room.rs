//! Handlers for the `/rooms` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roomspec_core::entity::EntityRef;
use roomspec_core::error::CoreError;
use roomspec_core::types::DbId;
use roomspec_db::models::room::{CreateRoom, Room, UpdateRoom};
use roomspec_db::repositories::RoomRepo;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::require_owner;
use crate::state::AppState;

/// POST /api/v1/rooms -- owner of the parent property only.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateRoom>,
) -> AppResult<(StatusCode, Json<Room>)> {
    require_owner(
        &state.pool,
        user.user_id,
        EntityRef::Property(input.property_id),
    )
    .await?;
    let room = RoomRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// GET /api/v1/rooms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Room>> {
    let room = RoomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Room", id }))?;
    Ok(Json(room))
}

/// GET /api/v1/properties/{property_id}/rooms
pub async fn list_by_property(
    State(state): State<AppState>,
    Path(property_id): Path<DbId>,
) -> AppResult<Json<Vec<Room>>> {
    let rooms = RoomRepo::list_by_property(&state.pool, property_id).await?;
    Ok(Json(rooms))
}

/// PUT /api/v1/rooms/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoom>,
) -> AppResult<Json<Room>> {
    require_owner(&state.pool, user.user_id, EntityRef::Room(id)).await?;
    let room = RoomRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Room", id }))?;
    Ok(Json(room))
}

/// DELETE /api/v1/rooms/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_owner(&state.pool, user.user_id, EntityRef::Room(id)).await?;
    let deleted = RoomRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Room", id }))
    }
}
