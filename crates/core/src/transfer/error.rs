//! Transfer workflow error types.

use thiserror::Error;

use super::types::TransferStatus;

/// Errors that can occur during the transfer workflow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    /// Submitted passcode does not match the stored one.
    #[error("Invalid one-time passcode")]
    InvalidOtp,

    /// Passcode validity window has lapsed.
    #[error("One-time passcode has expired")]
    OtpExpired,

    /// The transfer already reached a terminal state.
    #[error("Transfer already processed (status: {0})")]
    AlreadyProcessed(TransferStatus),

    /// Source and destination accounts must differ.
    #[error("Cannot transfer to the same account")]
    SameAccount,
}
