//! Handlers for the `/products` resource and its nested specification and
//! dimension sub-resources.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roomspec_core::entity::EntityRef;
use roomspec_core::error::CoreError;
use roomspec_core::types::DbId;
use roomspec_db::models::product::{
    CreateProduct, CreateProductDimension, CreateProductSpecification, Product, ProductDimension,
    ProductSpecification, UpdateProduct, UpdateProductDimension, UpdateProductSpecification,
};
use roomspec_db::repositories::{ProductDimensionRepo, ProductRepo, ProductSpecificationRepo};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::require_owner;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// POST /api/v1/products -- owner of the parent room's property only.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    require_owner(&state.pool, user.user_id, EntityRef::Room(input.room_id)).await?;
    let product = ProductRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/v1/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Product>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(product))
}

/// GET /api/v1/rooms/{room_id}/products
pub async fn list_by_room(
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
) -> AppResult<Json<Vec<Product>>> {
    let products = ProductRepo::list_by_room(&state.pool, room_id).await?;
    Ok(Json(products))
}

/// PUT /api/v1/products/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<Product>> {
    require_owner(&state.pool, user.user_id, EntityRef::Product(id)).await?;
    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(product))
}

/// DELETE /api/v1/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_owner(&state.pool, user.user_id, EntityRef::Product(id)).await?;
    let deleted = ProductRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Specifications
// ---------------------------------------------------------------------------

/// POST /api/v1/specifications
pub async fn create_specification(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProductSpecification>,
) -> AppResult<(StatusCode, Json<ProductSpecification>)> {
    require_owner(
        &state.pool,
        user.user_id,
        EntityRef::Product(input.product_id),
    )
    .await?;
    let spec = ProductSpecificationRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(spec)))
}

/// GET /api/v1/specifications/{id}
pub async fn get_specification(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductSpecification>> {
    let spec = ProductSpecificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductSpecification",
            id,
        }))?;
    Ok(Json(spec))
}

/// GET /api/v1/products/{product_id}/specifications
pub async fn list_specifications(
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<Json<Vec<ProductSpecification>>> {
    let specs = ProductSpecificationRepo::list_by_product(&state.pool, product_id).await?;
    Ok(Json(specs))
}

/// PUT /api/v1/specifications/{id}
pub async fn update_specification(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProductSpecification>,
) -> AppResult<Json<ProductSpecification>> {
    require_owner(&state.pool, user.user_id, EntityRef::Specification(id)).await?;
    let spec = ProductSpecificationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductSpecification",
            id,
        }))?;
    Ok(Json(spec))
}

/// DELETE /api/v1/specifications/{id}
pub async fn delete_specification(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_owner(&state.pool, user.user_id, EntityRef::Specification(id)).await?;
    let deleted = ProductSpecificationRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ProductSpecification",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

/// POST /api/v1/dimensions
pub async fn create_dimension(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProductDimension>,
) -> AppResult<(StatusCode, Json<ProductDimension>)> {
    require_owner(
        &state.pool,
        user.user_id,
        EntityRef::Product(input.product_id),
    )
    .await?;
    let dimension = ProductDimensionRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(dimension)))
}

/// GET /api/v1/dimensions/{id}
pub async fn get_dimension(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductDimension>> {
    let dimension = ProductDimensionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductDimension",
            id,
        }))?;
    Ok(Json(dimension))
}

/// GET /api/v1/products/{product_id}/dimensions
pub async fn list_dimensions(
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<Json<Vec<ProductDimension>>> {
    let dimensions = ProductDimensionRepo::list_by_product(&state.pool, product_id).await?;
    Ok(Json(dimensions))
}

/// PUT /api/v1/dimensions/{id}
pub async fn update_dimension(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProductDimension>,
) -> AppResult<Json<ProductDimension>> {
    require_owner(&state.pool, user.user_id, EntityRef::Dimension(id)).await?;
    let dimension = ProductDimensionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductDimension",
            id,
        }))?;
    Ok(Json(dimension))
}

/// DELETE /api/v1/dimensions/{id}
pub async fn delete_dimension(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_owner(&state.pool, user.user_id, EntityRef::Dimension(id)).await?;
    let deleted = ProductDimensionRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ProductDimension",
            id,
        }))
    }
}
