//! Admin-reviewed withdrawal request routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
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
use ferrum_core::withdrawal::Decision;
use ferrum_db::WithdrawalRepository;
use ferrum_db::entities::sea_orm_active_enums::ReviewStatus;
use ferrum_db::entities::withdrawal_requests;
use ferrum_db::repositories::CreateWithdrawalInput;
use ferrum_shared::AppError;

/// Request body for submitting a withdrawal request.
#[derive(Debug, Deserialize)]
pub struct CreateWithdrawalRequest {
    /// Customer submitting the request.
    pub owner_id: Uuid,
    /// Account to withdraw from.
    pub account_id: Uuid,
    /// Admin assigned to review the request.
    pub admin_id: Uuid,
    /// Amount to withdraw.
    pub amount: Decimal,
    /// Optional description.
    pub description: Option<String>,
}

/// Request body for resolving a withdrawal request.
#[derive(Debug, Deserialize)]
pub struct ResolveWithdrawalRequest {
    /// Admin making the decision; must be the assigned one.
    pub admin_id: Uuid,
    /// The decision.
    pub decision: DecisionRequest,
}

/// Decision carried in a resolve request.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionRequest {
    /// Approve and debit the account.
    Approve,
    /// Reject without moving funds.
    Reject,
}

impl From<DecisionRequest> for Decision {
    fn from(d: DecisionRequest) -> Self {
        match d {
            DecisionRequest::Approve => Self::Approve,
            DecisionRequest::Reject => Self::Reject,
        }
    }
}

/// Query parameters for the admin queue listing.
#[derive(Debug, Deserialize)]
pub struct QueueQuery {
    /// Narrow to a single status.
    pub status: Option<ReviewStatus>,
}

fn request_json(request: &withdrawal_requests::Model) -> serde_json::Value {
    json!({
        "id": request.id,
        "account_id": request.account_id,
        "admin_id": request.admin_id,
        "amount": request.amount,
        "description": request.description,
        "status": request.status,
        "created_at": request.created_at,
        "processed_at": request.processed_at,
    })
}

/// POST /withdrawals - Submit a withdrawal request for review.
async fn create_request(
    State(state): State<AppState>,
    Json(payload): Json<CreateWithdrawalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = WithdrawalRepository::new((*state.db).clone());

    let request = repo
        .create_request(CreateWithdrawalInput {
            owner_id: payload.owner_id,
            account_id: payload.account_id,
            admin_id: payload.admin_id,
            amount: payload.amount,
            description: payload.description,
        })
        .await?;

    info!(
        request_id = %request.id,
        account_id = %request.account_id,
        admin_id = %request.admin_id,
        amount = %request.amount,
        "Withdrawal request submitted"
    );

    Ok((StatusCode::CREATED, Json(request_json(&request))))
}

/// POST `/withdrawals/{request_id}/resolve` - Approve or reject a request.
async fn resolve_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<ResolveWithdrawalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = WithdrawalRepository::new((*state.db).clone());

    let request = repo
        .resolve_request(request_id, payload.admin_id, payload.decision.into())
        .await?;

    info!(
        request_id = %request.id,
        admin_id = %payload.admin_id,
        status = ?request.status,
        "Withdrawal request resolved"
    );

    Ok(Json(request_json(&request)))
}

/// GET `/withdrawals/{request_id}` - Get request details.
async fn get_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = WithdrawalRepository::new((*state.db).clone());

    let request = repo
        .find_request_by_id(request_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Withdrawal request not found: {request_id}"))
        })?;

    Ok(Json(request_json(&request)))
}

/// GET `/admins/{admin_id}/withdrawals` - An admin's review queue.
async fn list_for_admin(
    State(state): State<AppState>,
    Path(admin_id): Path<Uuid>,
    Query(query): Query<QueueQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = WithdrawalRepository::new((*state.db).clone());

    let rows = repo.list_requests_for_admin(admin_id, query.status).await?;
    let rows: Vec<_> = rows.iter().map(request_json).collect();

    Ok(Json(json!({ "withdrawals": rows })))
}

/// GET `/accounts/{account_id}/withdrawals` - Requests against an account.
async fn list_for_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = WithdrawalRepository::new((*state.db).clone());

    let rows = repo.list_requests_for_account(account_id).await?;
    let rows: Vec<_> = rows.iter().map(request_json).collect();

    Ok(Json(json!({ "withdrawals": rows })))
}

/// Creates the withdrawals router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/withdrawals", post(create_request))
        .route("/withdrawals/{request_id}", get(get_request))
        .route("/withdrawals/{request_id}/resolve", post(resolve_request))
        .route("/admins/{admin_id}/withdrawals", get(list_for_admin))
        .route("/accounts/{account_id}/withdrawals", get(list_for_account))
}
