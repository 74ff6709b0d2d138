//! Caller-identity extractors for Axum handlers.
//!
//! Authentication itself is external (a gateway or session layer in front
//! of this service); the caller's user id arrives as the opaque
//! `x-user-id` header. Two extractors cover the two access patterns:
//! [`AuthUser`] for endpoints that require an identity, and [`Viewer`] for
//! read endpoints that also serve anonymous traffic.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use roomspec_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// A required caller identity.
///
/// Use this as an extractor parameter in any handler that refuses
/// anonymous callers:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parse_user_id_header(parts)?.ok_or_else(|| {
            AppError::Unauthorized(format!("Missing {USER_ID_HEADER} header"))
        })?;
        Ok(AuthUser { user_id })
    }
}

/// An optional caller identity for endpoints that serve anonymous viewers.
///
/// Anonymous viewers can neither own nor have purchased anything, so the
/// gating layer treats `Viewer(None)` as fully unprivileged.
#[derive(Debug, Clone, Copy)]
pub struct Viewer(pub Option<DbId>);

impl FromRequestParts<AppState> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Viewer(parse_user_id_header(parts)?))
    }
}

/// Parse the `x-user-id` header if present. A present-but-malformed header
/// is rejected rather than treated as anonymous.
fn parse_user_id_header(parts: &Parts) -> Result<Option<DbId>, AppError> {
    let Some(value) = parts.headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };
    let id = value
        .to_str()
        .ok()
        .and_then(|s| s.parse::<DbId>().ok())
        .ok_or_else(|| {
            AppError::Unauthorized(format!("Invalid {USER_ID_HEADER} header"))
        })?;
    Ok(Some(id))
}
