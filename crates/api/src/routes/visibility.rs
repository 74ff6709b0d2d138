//! Route definitions for the `/visibility` endpoint.

use axum::routing::get;
use axum::Router;

use crate::handlers::visibility;
use crate::state::AppState;

/// Routes mounted at `/visibility`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(visibility::check))
}
