//! Handlers for the `/images` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use roomspec_core::entity::{EntityKind, EntityRef};
use roomspec_core::error::CoreError;
use roomspec_core::image::attachment_parent;
use roomspec_core::types::DbId;
use roomspec_db::models::image::{CreateImage, Image, UpdateImage};
use roomspec_db::repositories::ImageRepo;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::require_owner;
use crate::state::AppState;

/// POST /api/v1/images -- owner of the attachment parent only.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateImage>,
) -> AppResult<(StatusCode, Json<Image>)> {
    let parent = attachment_parent(
        input.property_id,
        input.room_id,
        input.product_id,
        input.product_specification_id,
        input.drawing_id,
    )?;
    require_owner(&state.pool, user.user_id, parent).await?;
    let image = ImageRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// GET /api/v1/images/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Image>> {
    let image = ImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id,
        }))?;
    Ok(Json(image))
}

/// Query parameters selecting an attachment parent.
#[derive(Debug, Deserialize)]
pub struct ParentQuery {
    pub parent_kind: String,
    pub parent_id: DbId,
}

/// GET /api/v1/images?parent_kind=&parent_id=
pub async fn list_by_parent(
    State(state): State<AppState>,
    Query(query): Query<ParentQuery>,
) -> AppResult<Json<Vec<Image>>> {
    let kind = EntityKind::from_str_value(&query.parent_kind)?;
    let parent = EntityRef::new(kind, query.parent_id);
    let images = ImageRepo::list_by_parent(&state.pool, parent).await?;
    Ok(Json(images))
}

/// PUT /api/v1/images/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateImage>,
) -> AppResult<Json<Image>> {
    require_owner(&state.pool, user.user_id, EntityRef::Image(id)).await?;
    let image = ImageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id,
        }))?;
    Ok(Json(image))
}

/// DELETE /api/v1/images/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_owner(&state.pool, user.user_id, EntityRef::Image(id)).await?;
    let deleted = ImageRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id,
        }))
    }
}
