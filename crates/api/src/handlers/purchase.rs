//! Handlers for purchase completion and history.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use roomspec_core::error::CoreError;
use roomspec_core::types::DbId;
use roomspec_db::models::transaction::Transaction;
use roomspec_db::repositories::{ListingRepo, TransactionRepo};
use roomspec_db::RepoError;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Payload of the payment processor's completion signal.
#[derive(Debug, Deserialize)]
pub struct PurchaseCompletion {
    pub listing_id: DbId,
    pub buyer_id: DbId,
    /// Amount captured, in minor currency units.
    pub amount: i64,
}

/// POST /api/v1/purchases/complete
///
/// Idempotent: redelivered signals return the existing transaction with
/// 200 instead of 201, even when the listing has since gone sold. A new
/// purchase requires the listing to be offerable.
///
/// Service listings (consultation, property viewing) sell one engagement
/// and are marked sold; spec listings stay published so other buyers can
/// keep purchasing the same content.
pub async fn complete(
    State(state): State<AppState>,
    Json(input): Json<PurchaseCompletion>,
) -> AppResult<(StatusCode, Json<Transaction>)> {
    let listing = ListingRepo::find_by_id(&state.pool, input.listing_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: input.listing_id,
        }))?;
    if !listing.status_value()?.is_offerable() {
        // A redelivered signal can arrive after a service listing went
        // sold; answer it with the recorded transaction, not an error.
        if let Some(existing) = TransactionRepo::find_by_buyer_and_listing(
            &state.pool,
            input.buyer_id,
            input.listing_id,
        )
        .await?
        {
            return Ok((StatusCode::OK, Json(existing)));
        }
        return Err(AppError::Core(CoreError::Validation(format!(
            "Listing {} is not available for purchase (status '{}')",
            listing.id, listing.status
        ))));
    }

    let (transaction, inserted) =
        TransactionRepo::record_purchase(&state.pool, input.buyer_id, input.listing_id, input.amount)
            .await?;
    let status = if inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    if inserted && !listing.scope()?.listing_type().is_specs() {
        match ListingRepo::complete(&state.pool, listing.id).await {
            Ok(_) => {}
            // Lost a race with a concurrent completion that already marked
            // the listing sold; the ledger row is the outcome that counts.
            Err(RepoError::Core(CoreError::StateTransition { .. })) => {}
            Err(err) => return Err(err.into()),
        }
    }

    Ok((status, Json(transaction)))
}

/// GET /api/v1/purchases/history -- the caller's purchases, newest first.
pub async fn history(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Transaction>>> {
    let transactions = TransactionRepo::history_for(&state.pool, user.user_id).await?;
    Ok(Json(transactions))
}
