//! Route definitions for the `/products`, `/specifications`, and
//! `/dimensions` resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Routes mounted at `/products`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(product::create))
        .route(
            "/{id}",
            get(product::get_by_id)
                .put(product::update)
                .delete(product::delete),
        )
        .route(
            "/{product_id}/specifications",
            get(product::list_specifications),
        )
        .route("/{product_id}/dimensions", get(product::list_dimensions))
}

/// Routes mounted at `/specifications`.
pub fn specification_router() -> Router<AppState> {
    Router::new()
        .route("/", post(product::create_specification))
        .route(
            "/{id}",
            get(product::get_specification)
                .put(product::update_specification)
                .delete(product::delete_specification),
        )
}

/// Routes mounted at `/dimensions`.
pub fn dimension_router() -> Router<AppState> {
    Router::new()
        .route("/", post(product::create_dimension))
        .route(
            "/{id}",
            get(product::get_dimension)
                .put(product::update_dimension)
                .delete(product::delete_dimension),
        )
}
