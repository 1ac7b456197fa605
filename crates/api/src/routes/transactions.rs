//! Deposit, withdrawal, and transaction history routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError};
use ferrum_db::LedgerRepository;
use ferrum_db::entities::sea_orm_active_enums::TransactionKind;
use ferrum_db::entities::transactions;
use ferrum_db::repositories::TransactionFilter;

/// Request body for a deposit or an immediate withdrawal.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    /// Amount to move.
    pub amount: Decimal,
    /// Optional description recorded on the transaction.
    pub description: Option<String>,
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Filter by kind.
    pub kind: Option<TransactionKind>,
    /// Only transactions at or after this instant.
    pub from: Option<DateTime<Utc>>,
    /// Only transactions at or before this instant.
    pub to: Option<DateTime<Utc>>,
}

fn transaction_json(row: &transactions::Model) -> serde_json::Value {
    json!({
        "id": row.id,
        "account_id": row.account_id,
        "kind": row.kind,
        "amount": row.amount,
        "balance_after": row.balance_after,
        "counterpart_account_id": row.counterpart_account_id,
        "description": row.description,
        "created_at": row.created_at,
    })
}

/// POST `/accounts/{account_id}/deposit` - Credit funds.
async fn deposit(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<AmountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LedgerRepository::new((*state.db).clone());

    let row = repo
        .deposit(account_id, payload.amount, payload.description)
        .await?;

    info!(
        account_id = %account_id,
        transaction_id = %row.id,
        amount = %row.amount,
        "Deposit recorded"
    );

    Ok((StatusCode::CREATED, Json(transaction_json(&row))))
}

/// POST `/accounts/{account_id}/withdraw` - Debit funds immediately.
async fn withdraw(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<AmountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LedgerRepository::new((*state.db).clone());

    let row = repo
        .withdraw(account_id, payload.amount, payload.description)
        .await?;

    info!(
        account_id = %account_id,
        transaction_id = %row.id,
        amount = %row.amount,
        "Withdrawal recorded"
    );

    Ok((StatusCode::CREATED, Json(transaction_json(&row))))
}

/// GET `/accounts/{account_id}/transactions` - Transaction history, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LedgerRepository::new((*state.db).clone());

    let rows = repo
        .list_transactions(
            account_id,
            TransactionFilter {
                kind: query.kind,
                from: query.from,
                to: query.to,
            },
        )
        .await?;
    let rows: Vec<_> = rows.iter().map(transaction_json).collect();

    Ok(Json(json!({ "transactions": rows })))
}

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts/{account_id}/deposit", post(deposit))
        .route("/accounts/{account_id}/withdraw", post(withdraw))
        .route(
            "/accounts/{account_id}/transactions",
            get(list_transactions),
        )
}
