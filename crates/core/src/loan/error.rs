//! Loan workflow error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::review::ReviewStatus;

/// Errors that can occur during the loan workflow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoanError {
    /// Principal must be strictly positive.
    #[error("Invalid loan principal: {0}")]
    InvalidPrincipal(Decimal),

    /// Term must be at least one month.
    #[error("Invalid loan term: {0} months")]
    InvalidTerm(u32),

    /// Annual interest rate cannot be negative.
    #[error("Invalid interest rate: {0}")]
    InvalidRate(Decimal),

    /// The applicant already holds the maximum number of open loans.
    #[error("User already has {0} loans in pending or approved state")]
    MaxLoansExceeded(u64),

    /// The loan already reached a terminal state.
    #[error("Loan already processed (status: {0})")]
    AlreadyProcessed(ReviewStatus),
}
