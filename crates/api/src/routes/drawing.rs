//! Route definitions for the `/drawings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::drawing;
use crate::state::AppState;

/// Routes mounted at `/drawings`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(drawing::create))
        .route(
            "/{id}",
            get(drawing::get_by_id)
                .put(drawing::update)
                .delete(drawing::delete),
        )
}
