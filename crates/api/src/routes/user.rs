//! Route definitions for `/users` and `/seller-profile`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
pub fn user_router() -> Router<AppState> {
    Router::new()
        .route("/", post(user::create))
        .route("/{id}", get(user::get_by_id))
}

/// Routes mounted at `/seller-profile` (always the caller's own).
pub fn seller_profile_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(user::get_seller_profile)
            .post(user::create_seller_profile)
            .put(user::update_seller_profile),
    )
}
