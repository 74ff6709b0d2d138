//! Route definitions for the `/listings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::listing;
use crate::state::AppState;

/// Routes mounted at `/listings`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(listing::list_mine).post(listing::create))
        .route("/{id}", get(listing::get_by_id).put(listing::update))
        .route("/{id}/publish", post(listing::publish))
        .route("/{id}/reserve", post(listing::reserve))
        .route("/{id}/cancel", post(listing::cancel))
}
