//! Two-step transfer routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError};
use ferrum_db::TransferRepository;
use ferrum_db::entities::transfers;
use ferrum_db::repositories::InitiateTransferInput;
use ferrum_shared::AppError;

/// Request body for initiating a transfer.
#[derive(Debug, Deserialize)]
pub struct InitiateTransferRequest {
    /// Customer initiating the transfer.
    pub owner_id: Uuid,
    /// Source account ID.
    pub from_account_id: Uuid,
    /// Destination account number.
    pub to_account_number: String,
    /// Amount to move.
    pub amount: Decimal,
}

/// Request body for confirming a transfer.
#[derive(Debug, Deserialize)]
pub struct ConfirmTransferRequest {
    /// One-time code issued at initiation.
    pub otp: String,
}

// The one-time code never appears in a response body.
fn transfer_json(transfer: &transfers::Model) -> serde_json::Value {
    json!({
        "id": transfer.id,
        "from_account_id": transfer.from_account_id,
        "to_account_id": transfer.to_account_id,
        "amount": transfer.amount,
        "status": transfer.status,
        "otp_expires_at": transfer.otp_expires_at,
        "created_at": transfer.created_at,
        "processed_at": transfer.processed_at,
    })
}

/// POST /transfers - Record a pending transfer and issue its one-time code.
async fn initiate_transfer(
    State(state): State<AppState>,
    Json(payload): Json<InitiateTransferRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TransferRepository::new((*state.db).clone()).with_otp_ttl(state.otp_ttl);

    let transfer = repo
        .initiate(InitiateTransferInput {
            owner_id: payload.owner_id,
            from_account_id: payload.from_account_id,
            to_account_number: payload.to_account_number,
            amount: payload.amount,
        })
        .await?;

    // Stand-in for an SMS/email channel: surface the code in the server log
    // so a local operator can relay it.
    info!(
        transfer_id = %transfer.id,
        otp = %transfer.otp_code,
        expires_at = %transfer.otp_expires_at,
        "Transfer initiated, one-time code issued"
    );

    Ok((StatusCode::CREATED, Json(transfer_json(&transfer))))
}

/// POST `/transfers/{transfer_id}/confirm` - Verify the code and move funds.
async fn confirm_transfer(
    State(state): State<AppState>,
    Path(transfer_id): Path<Uuid>,
    Json(payload): Json<ConfirmTransferRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TransferRepository::new((*state.db).clone());

    let transfer = repo.confirm(transfer_id, &payload.otp).await?;

    info!(
        transfer_id = %transfer.id,
        amount = %transfer.amount,
        "Transfer completed"
    );

    Ok(Json(transfer_json(&transfer)))
}

/// GET `/transfers/{transfer_id}` - Get transfer details.
async fn get_transfer(
    State(state): State<AppState>,
    Path(transfer_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TransferRepository::new((*state.db).clone());

    let transfer = repo
        .find_transfer_by_id(transfer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Transfer not found: {transfer_id}")))?;

    Ok(Json(transfer_json(&transfer)))
}

/// GET `/accounts/{account_id}/transfers` - Transfers touching an account.
async fn list_transfers(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TransferRepository::new((*state.db).clone());

    let rows = repo.list_transfers_for_account(account_id).await?;
    let rows: Vec<_> = rows.iter().map(transfer_json).collect();

    Ok(Json(json!({ "transfers": rows })))
}

/// POST /transfers/sweep-expired - Fail pending transfers with lapsed codes.
async fn sweep_expired(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = TransferRepository::new((*state.db).clone());

    let swept = repo.sweep_expired().await?;

    if swept > 0 {
        info!(count = swept, "Expired transfers swept to failed");
    }

    Ok(Json(json!({ "swept": swept })))
}

/// Creates the transfers router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transfers", post(initiate_transfer))
        .route("/transfers/sweep-expired", post(sweep_expired))
        .route("/transfers/{transfer_id}", get(get_transfer))
        .route("/transfers/{transfer_id}/confirm", post(confirm_transfer))
        .route("/accounts/{account_id}/transfers", get(list_transfers))
}
