//! Withdrawal-request workflow error types.

use thiserror::Error;
use uuid::Uuid;

use crate::review::ReviewStatus;

/// Errors that can occur during the withdrawal-request workflow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WithdrawalError {
    /// The request already reached a terminal state.
    #[error("Withdrawal request already processed (status: {0})")]
    AlreadyProcessed(ReviewStatus),

    /// Only the admin assigned at request time may resolve the request.
    #[error("Admin {presented} is not assigned to this request (assigned: {assigned})")]
    UnauthorizedAdmin {
        /// The admin stored on the request.
        assigned: Uuid,
        /// The admin attempting the resolution.
        presented: Uuid,
    },
}
