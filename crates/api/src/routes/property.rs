//! Route definitions for the `/properties` resource.
//!
//! Also nests room and drawing listings under `/properties/{property_id}/...`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{drawing, property, room};
use crate::state::AppState;

/// Routes mounted at `/properties`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(property::list_mine).post(property::create))
        .route(
            "/{id}",
            get(property::get_by_id)
                .put(property::update)
                .delete(property::delete),
        )
        .route("/{property_id}/rooms", get(room::list_by_property))
        .route("/{property_id}/drawings", get(drawing::list_by_property))
}
