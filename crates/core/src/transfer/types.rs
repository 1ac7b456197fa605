//! Transfer domain types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of digits in a transfer one-time passcode.
pub const OTP_DIGITS: usize = 6;

/// Default passcode validity window in seconds (5 minutes).
pub const DEFAULT_OTP_TTL_SECS: i64 = 300;

/// Status of a two-step transfer.
///
/// The valid transitions are:
/// - Pending -> Completed (passcode verified, both ledger legs written)
/// - Pending -> Failed (non-retriable confirmation failure, or expiry sweep)
///
/// A transfer never leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Awaiting passcode confirmation; no funds moved yet.
    Pending,
    /// Both ledger legs committed (terminal).
    Completed,
    /// Confirmation failed non-retriably or the passcode window lapsed (terminal).
    Failed,
}

impl TransferStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Returns true if the transfer has reached a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns true if moving from `self` to `to` is a legal transition.
    #[must_use]
    pub const fn can_transition(&self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Completed) | (Self::Pending, Self::Failed)
        )
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_transitions() {
        assert!(TransferStatus::Pending.can_transition(TransferStatus::Completed));
        assert!(TransferStatus::Pending.can_transition(TransferStatus::Failed));

        assert!(!TransferStatus::Completed.can_transition(TransferStatus::Pending));
        assert!(!TransferStatus::Completed.can_transition(TransferStatus::Failed));
        assert!(!TransferStatus::Failed.can_transition(TransferStatus::Completed));
        assert!(!TransferStatus::Pending.can_transition(TransferStatus::Pending));
    }

    #[test]
    fn test_parse_round_trip() {
        for status in [
            TransferStatus::Pending,
            TransferStatus::Completed,
            TransferStatus::Failed,
        ] {
            assert_eq!(TransferStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TransferStatus::parse("reversed"), None);
    }
}
