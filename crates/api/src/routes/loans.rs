//! Loan application and review routes.

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
use ferrum_db::LoanRepository;
use ferrum_db::entities::loans;
use ferrum_db::repositories::CreateLoanInput;
use ferrum_shared::AppError;

/// Request body for a loan application.
#[derive(Debug, Deserialize)]
pub struct CreateLoanRequest {
    /// Applicant ID.
    pub user_id: Uuid,
    /// Account the principal is disbursed into on approval.
    pub account_id: Uuid,
    /// Principal amount.
    pub amount: Decimal,
    /// Annual interest rate in percent.
    pub interest_rate: Decimal,
    /// Repayment term in months.
    pub term_months: u32,
}

/// Request body for resolving a loan (approve or reject).
#[derive(Debug, Default, Deserialize)]
pub struct ResolveLoanRequest {
    /// Reviewer's remarks.
    pub remarks: Option<String>,
}

fn loan_json(loan: &loans::Model) -> serde_json::Value {
    json!({
        "id": loan.id,
        "user_id": loan.user_id,
        "account_id": loan.account_id,
        "amount": loan.amount,
        "interest_rate": loan.interest_rate,
        "term_months": loan.term_months,
        "monthly_payment": loan.monthly_payment,
        "status": loan.status,
        "remarks": loan.remarks,
        "created_at": loan.created_at,
        "processed_at": loan.processed_at,
    })
}

/// POST /loans - Submit a loan application.
async fn apply(
    State(state): State<AppState>,
    Json(payload): Json<CreateLoanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LoanRepository::new((*state.db).clone());

    let loan = repo
        .apply(CreateLoanInput {
            user_id: payload.user_id,
            account_id: payload.account_id,
            amount: payload.amount,
            interest_rate: payload.interest_rate,
            term_months: payload.term_months,
        })
        .await?;

    info!(
        loan_id = %loan.id,
        user_id = %loan.user_id,
        amount = %loan.amount,
        "Loan application submitted"
    );

    Ok((StatusCode::CREATED, Json(loan_json(&loan))))
}

/// POST `/loans/{loan_id}/approve` - Approve and disburse a loan.
async fn approve_loan(
    State(state): State<AppState>,
    Path(loan_id): Path<Uuid>,
    Json(payload): Json<ResolveLoanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LoanRepository::new((*state.db).clone());

    let loan = repo.approve_loan(loan_id, payload.remarks).await?;

    info!(
        loan_id = %loan.id,
        account_id = %loan.account_id,
        amount = %loan.amount,
        monthly_payment = ?loan.monthly_payment,
        "Loan approved and disbursed"
    );

    Ok(Json(loan_json(&loan)))
}

/// POST `/loans/{loan_id}/reject` - Reject a loan with remarks.
async fn reject_loan(
    State(state): State<AppState>,
    Path(loan_id): Path<Uuid>,
    Json(payload): Json<ResolveLoanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LoanRepository::new((*state.db).clone());

    let loan = repo.reject_loan(loan_id, payload.remarks).await?;

    info!(loan_id = %loan.id, "Loan rejected");

    Ok(Json(loan_json(&loan)))
}

/// GET `/loans/{loan_id}` - Get loan details.
async fn get_loan(
    State(state): State<AppState>,
    Path(loan_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LoanRepository::new((*state.db).clone());

    let loan = repo
        .find_loan_by_id(loan_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Loan not found: {loan_id}")))?;

    Ok(Json(loan_json(&loan)))
}

/// GET `/users/{user_id}/loans` - A user's loans.
async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LoanRepository::new((*state.db).clone());

    let rows = repo.list_loans_for_user(user_id).await?;
    let rows: Vec<_> = rows.iter().map(loan_json).collect();

    Ok(Json(json!({ "loans": rows })))
}

/// GET /loans/pending - The review queue, oldest first.
async fn list_pending(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = LoanRepository::new((*state.db).clone());

    let rows = repo.list_pending_loans().await?;
    let rows: Vec<_> = rows.iter().map(loan_json).collect();

    Ok(Json(json!({ "loans": rows })))
}

/// Creates the loans router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/loans", post(apply))
        .route("/loans/pending", get(list_pending))
        .route("/loans/{loan_id}", get(get_loan))
        .route("/loans/{loan_id}/approve", post(approve_loan))
        .route("/loans/{loan_id}/reject", post(reject_loan))
        .route("/users/{user_id}/loans", get(list_for_user))
}
