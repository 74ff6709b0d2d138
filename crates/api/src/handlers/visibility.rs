//! The visibility read endpoint.

use axum::extract::{Query, State};
use axum::Json;
use roomspec_core::entity::{EntityKind, EntityRef};
use roomspec_core::visibility::{FieldClass, Visibility};
use roomspec_db::repositories::VisibilityRepo;
use serde::{Deserialize, Serialize};

use crate::auth::Viewer;
use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for a visibility check.
#[derive(Debug, Deserialize)]
pub struct VisibilityQuery {
    pub target_kind: String,
    pub target_id: roomspec_core::types::DbId,
    /// `public` or `premium`.
    pub field_class: String,
}

/// Response payload: the decision plus the inputs it answered for.
#[derive(Debug, Serialize)]
pub struct VisibilityResponse {
    pub target: EntityRef,
    pub field_class: FieldClass,
    pub visibility: Visibility,
}

/// GET /api/v1/visibility?target_kind=&target_id=&field_class=
///
/// Works for anonymous viewers too; anonymity simply grants no ownership
/// and no purchases.
pub async fn check(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(query): Query<VisibilityQuery>,
) -> AppResult<Json<VisibilityResponse>> {
    let kind = EntityKind::from_str_value(&query.target_kind)?;
    let target = EntityRef::new(kind, query.target_id);
    let field_class = FieldClass::from_str_value(&query.field_class)?;

    let visibility = VisibilityRepo::decide_for(&state.pool, viewer.0, target, field_class).await?;
    Ok(Json(VisibilityResponse {
        target,
        field_class,
        visibility,
    }))
}
