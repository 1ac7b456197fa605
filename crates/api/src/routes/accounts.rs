//! Account management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError};
use ferrum_db::AccountRepository;
use ferrum_db::entities::accounts;
use ferrum_db::entities::sea_orm_active_enums::{AccountStatus, AccountType};
use ferrum_db::repositories::CreateAccountInput;
use ferrum_shared::AppError;

/// Request body for opening an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Owner (customer) ID.
    pub owner_id: Uuid,
    /// Account type.
    pub account_type: AccountType,
}

/// Request body for changing an account's status.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// New lifecycle status.
    pub status: AccountStatus,
}

fn account_json(account: &accounts::Model) -> serde_json::Value {
    json!({
        "id": account.id,
        "owner_id": account.owner_id,
        "number": account.number,
        "account_type": account.account_type,
        "balance": account.balance,
        "status": account.status,
        "created_at": account.created_at,
        "updated_at": account.updated_at,
    })
}

/// POST /accounts - Open a new account.
async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());

    let account = repo
        .create_account(CreateAccountInput {
            owner_id: payload.owner_id,
            account_type: payload.account_type,
        })
        .await?;

    info!(
        account_id = %account.id,
        owner_id = %account.owner_id,
        number = %account.number,
        "Account opened"
    );

    Ok((StatusCode::CREATED, Json(account_json(&account))))
}

/// GET `/accounts/{account_id}` - Get account details.
async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());

    let account = repo
        .find_account_by_id(account_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account not found: {account_id}")))?;

    Ok(Json(account_json(&account)))
}

/// GET `/accounts/{account_id}/balance` - Get the current balance.
async fn get_balance(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());

    let account = repo
        .find_account_by_id(account_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account not found: {account_id}")))?;

    Ok(Json(json!({
        "account_id": account.id,
        "balance": account.balance,
    })))
}

/// GET `/owners/{owner_id}/accounts` - List an owner's accounts.
async fn list_accounts(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());

    let accounts = repo.list_accounts_for_owner(owner_id).await?;
    let accounts: Vec<_> = accounts.iter().map(account_json).collect();

    Ok(Json(json!({ "accounts": accounts })))
}

/// PATCH `/accounts/{account_id}/status` - Change the lifecycle status.
async fn set_status(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());

    let account = repo.set_status(account_id, payload.status).await?;

    info!(account_id = %account.id, status = ?account.status, "Account status changed");

    Ok(Json(account_json(&account)))
}

/// DELETE `/accounts/{account_id}` - Delete an emptied account.
async fn delete_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());

    repo.delete_account(account_id).await?;

    info!(account_id = %account_id, "Account deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Creates the accounts router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts/{account_id}", get(get_account))
        .route("/accounts/{account_id}", delete(delete_account))
        .route("/accounts/{account_id}/balance", get(get_balance))
        .route("/accounts/{account_id}/status", patch(set_status))
        .route("/owners/{owner_id}/accounts", get(list_accounts))
}
