//! Route definitions for the `/purchases` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::purchase;
use crate::state::AppState;

/// Routes mounted at `/purchases`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/complete", post(purchase::complete))
        .route("/history", get(purchase::history))
}
