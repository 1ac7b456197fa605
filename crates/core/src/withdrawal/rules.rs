//! Resolution rules for withdrawal requests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::WithdrawalError;
use crate::review::ReviewStatus;

/// Admin decision on a pending withdrawal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Approve the request and debit the account.
    Approve,
    /// Reject the request; no balance effect.
    Reject,
}

/// A request may only be resolved while it is still pending.
///
/// # Errors
///
/// Returns `AlreadyProcessed` for terminal statuses.
pub fn ensure_pending(status: ReviewStatus) -> Result<(), WithdrawalError> {
    if status.is_terminal() {
        return Err(WithdrawalError::AlreadyProcessed(status));
    }
    Ok(())
}

/// Only the admin assigned at request time may resolve the request.
///
/// # Errors
///
/// Returns `UnauthorizedAdmin` when the resolving admin differs.
pub fn ensure_assigned_admin(assigned: Uuid, presented: Uuid) -> Result<(), WithdrawalError> {
    if assigned != presented {
        return Err(WithdrawalError::UnauthorizedAdmin {
            assigned,
            presented,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_resolvable() {
        assert_eq!(ensure_pending(ReviewStatus::Pending), Ok(()));
    }

    #[test]
    fn test_terminal_statuses_rejected() {
        assert_eq!(
            ensure_pending(ReviewStatus::Approved),
            Err(WithdrawalError::AlreadyProcessed(ReviewStatus::Approved))
        );
        assert_eq!(
            ensure_pending(ReviewStatus::Rejected),
            Err(WithdrawalError::AlreadyProcessed(ReviewStatus::Rejected))
        );
    }

    #[test]
    fn test_assigned_admin_allowed() {
        let admin = Uuid::new_v4();
        assert_eq!(ensure_assigned_admin(admin, admin), Ok(()));
    }

    #[test]
    fn test_other_admin_rejected() {
        let assigned = Uuid::new_v4();
        let presented = Uuid::new_v4();
        assert_eq!(
            ensure_assigned_admin(assigned, presented),
            Err(WithdrawalError::UnauthorizedAdmin {
                assigned,
                presented
            })
        );
    }
}
