//! Maps repository errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use ferrum_core::ledger::LedgerError;
use ferrum_core::loan::LoanError;
use ferrum_core::transfer::TransferError;
use ferrum_core::withdrawal::WithdrawalError;
use ferrum_db::repositories::{
    AccountError, LedgerStoreError, LoanStoreError, TransferStoreError, WithdrawalStoreError,
};
use ferrum_shared::AppError;

/// API error wrapper carrying the application error taxonomy.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Database internals never reach the client.
        let message = match &self.0 {
            AppError::Database(detail) | AppError::Internal(detail) => {
                error!(error = %detail, "Internal error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message,
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

fn from_ledger_rule(err: LedgerError) -> AppError {
    match err {
        LedgerError::InvalidAmount(_) => AppError::Validation(err.to_string()),
        LedgerError::InsufficientFunds { .. } => AppError::InsufficientFunds(err.to_string()),
        LedgerError::AccountInactive(_) => AppError::BusinessRule(err.to_string()),
    }
}

impl From<LedgerStoreError> for ApiError {
    fn from(err: LedgerStoreError) -> Self {
        let app = match err {
            LedgerStoreError::AccountNotFound(_) => AppError::NotFound(err.to_string()),
            LedgerStoreError::Rule(rule) => from_ledger_rule(rule),
            LedgerStoreError::Database(db) => AppError::Database(db.to_string()),
        };
        Self(app)
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        let app = match err {
            AccountError::AccountNotFound(_) => AppError::NotFound(err.to_string()),
            AccountError::HasBalance(_) => AppError::Conflict(err.to_string()),
            AccountError::NumberAllocation(_) => AppError::Internal(err.to_string()),
            AccountError::Database(db) => AppError::Database(db.to_string()),
        };
        Self(app)
    }
}

impl From<TransferStoreError> for ApiError {
    fn from(err: TransferStoreError) -> Self {
        let app = match err {
            TransferStoreError::TransferNotFound(_)
            | TransferStoreError::AccountNotFound(_)
            | TransferStoreError::UnknownAccountNumber(_) => AppError::NotFound(err.to_string()),
            TransferStoreError::NotAccountOwner(_) => AppError::Forbidden(err.to_string()),
            TransferStoreError::Rule(ref rule) => match rule {
                TransferError::SameAccount | TransferError::InvalidOtp => {
                    AppError::Validation(err.to_string())
                }
                TransferError::OtpExpired => AppError::BusinessRule(err.to_string()),
                TransferError::AlreadyProcessed(_) => AppError::Conflict(err.to_string()),
            },
            TransferStoreError::LedgerRule(rule) => from_ledger_rule(rule),
            TransferStoreError::Database(db) => AppError::Database(db.to_string()),
        };
        Self(app)
    }
}

impl From<WithdrawalStoreError> for ApiError {
    fn from(err: WithdrawalStoreError) -> Self {
        let app = match err {
            WithdrawalStoreError::RequestNotFound(_)
            | WithdrawalStoreError::AccountNotFound(_) => AppError::NotFound(err.to_string()),
            WithdrawalStoreError::NotAccountOwner(_) => AppError::Forbidden(err.to_string()),
            WithdrawalStoreError::Rule(ref rule) => match rule {
                WithdrawalError::AlreadyProcessed(_) => AppError::Conflict(err.to_string()),
                WithdrawalError::UnauthorizedAdmin { .. } => AppError::Forbidden(err.to_string()),
            },
            WithdrawalStoreError::LedgerRule(rule) => from_ledger_rule(rule),
            WithdrawalStoreError::Database(db) => AppError::Database(db.to_string()),
        };
        Self(app)
    }
}

impl From<LoanStoreError> for ApiError {
    fn from(err: LoanStoreError) -> Self {
        let app = match err {
            LoanStoreError::LoanNotFound(_) | LoanStoreError::AccountNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            LoanStoreError::NotAccountOwner(_) => AppError::Forbidden(err.to_string()),
            LoanStoreError::Rule(ref rule) => match rule {
                LoanError::InvalidPrincipal(_)
                | LoanError::InvalidTerm(_)
                | LoanError::InvalidRate(_) => AppError::Validation(err.to_string()),
                LoanError::MaxLoansExceeded(_) => AppError::BusinessRule(err.to_string()),
                LoanError::AlreadyProcessed(_) => AppError::Conflict(err.to_string()),
            },
            LoanStoreError::LedgerRule(rule) => from_ledger_rule(rule),
            LoanStoreError::Database(db) => AppError::Database(db.to_string()),
        };
        Self(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_insufficient_funds_maps_to_unprocessable() {
        let err: ApiError = LedgerStoreError::Rule(LedgerError::InsufficientFunds {
            available: dec!(5.00),
            requested: dec!(10.00),
        })
        .into();
        assert_eq!(err.0.status_code(), 422);
        assert_eq!(err.0.error_code(), "INSUFFICIENT_FUNDS");
    }

    #[test]
    fn test_already_processed_maps_to_conflict() {
        let err: ApiError = TransferStoreError::Rule(TransferError::AlreadyProcessed(
            ferrum_core::transfer::TransferStatus::Completed,
        ))
        .into();
        assert_eq!(err.0.status_code(), 409);
    }

    #[test]
    fn test_wrong_admin_maps_to_forbidden() {
        let err: ApiError = WithdrawalStoreError::Rule(WithdrawalError::UnauthorizedAdmin {
            assigned: Uuid::new_v4(),
            presented: Uuid::new_v4(),
        })
        .into();
        assert_eq!(err.0.status_code(), 403);
    }

    #[test]
    fn test_missing_account_maps_to_not_found() {
        let err: ApiError = LedgerStoreError::AccountNotFound(Uuid::new_v4()).into();
        assert_eq!(err.0.status_code(), 404);
    }
}
