//! Route definitions for the `/images` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::image;
use crate::state::AppState;

/// Routes mounted at `/images`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(image::list_by_parent).post(image::create))
        .route(
            "/{id}",
            get(image::get_by_id)
                .put(image::update)
                .delete(image::delete),
        )
}
