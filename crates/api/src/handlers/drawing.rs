//! Handlers for the `/drawings` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roomspec_core::entity::EntityRef;
use roomspec_core::error::CoreError;
use roomspec_core::types::DbId;
use roomspec_db::models::drawing::{CreateDrawing, Drawing, UpdateDrawing};
use roomspec_db::repositories::DrawingRepo;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::require_owner;
use crate::state::AppState;

/// POST /api/v1/drawings -- owner of the parent property only.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateDrawing>,
) -> AppResult<(StatusCode, Json<Drawing>)> {
    require_owner(
        &state.pool,
        user.user_id,
        EntityRef::Property(input.property_id),
    )
    .await?;
    let drawing = DrawingRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(drawing)))
}

/// GET /api/v1/drawings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Drawing>> {
    let drawing = DrawingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Drawing",
            id,
        }))?;
    Ok(Json(drawing))
}

/// GET /api/v1/properties/{property_id}/drawings
pub async fn list_by_property(
    State(state): State<AppState>,
    Path(property_id): Path<DbId>,
) -> AppResult<Json<Vec<Drawing>>> {
    let drawings = DrawingRepo::list_by_property(&state.pool, property_id).await?;
    Ok(Json(drawings))
}

/// PUT /api/v1/drawings/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDrawing>,
) -> AppResult<Json<Drawing>> {
    require_owner(&state.pool, user.user_id, EntityRef::Drawing(id)).await?;
    let drawing = DrawingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Drawing",
            id,
        }))?;
    Ok(Json(drawing))
}

/// DELETE /api/v1/drawings/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_owner(&state.pool, user.user_id, EntityRef::Drawing(id)).await?;
    let deleted = DrawingRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Drawing",
            id,
        }))
    }
}
