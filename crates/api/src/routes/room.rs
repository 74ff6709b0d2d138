//! Route definitions for the `/rooms` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{product, room};
use crate::state::AppState;

/// Routes mounted at `/rooms`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(room::create))
        .route(
            "/{id}",
            get(room::get_by_id).put(room::update).delete(room::delete),
        )
        .route("/{room_id}/products", get(product::list_by_room))
}
