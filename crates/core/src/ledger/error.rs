//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while applying a balance delta.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Operation magnitude must be strictly positive.
    #[error("Invalid amount: {0} (must be strictly positive)")]
    InvalidAmount(Decimal),

    /// A debit would take the balance below zero.
    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Balance before the rejected debit.
        available: Decimal,
        /// Magnitude of the rejected debit.
        requested: Decimal,
    },

    /// Account is not active and cannot move funds.
    #[error("Account {0} is not active")]
    AccountInactive(Uuid),
}
