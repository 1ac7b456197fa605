//! Ledger domain types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a balance-changing event.
///
/// Every transaction row records exactly one kind; the kind fixes the
/// direction in which the account balance moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Funds paid into the account.
    Deposit,
    /// Funds taken out of the account.
    Withdrawal,
    /// Incoming leg of a transfer between accounts.
    TransferIn,
    /// Outgoing leg of a transfer between accounts.
    TransferOut,
    /// Loan disbursement credited to the linked account.
    Loan,
}

impl TransactionKind {
    /// Returns true if this kind increases the account balance.
    #[must_use]
    pub const fn is_credit(&self) -> bool {
        matches!(self, Self::Deposit | Self::TransferIn | Self::Loan)
    }

    /// Returns true if this kind decreases the account balance.
    #[must_use]
    pub const fn is_debit(&self) -> bool {
        !self.is_credit()
    }

    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
            Self::TransferIn => "transfer_in",
            Self::TransferOut => "transfer_out",
            Self::Loan => "loan",
        }
    }

    /// Parses a kind from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deposit" => Some(Self::Deposit),
            "withdrawal" => Some(Self::Withdrawal),
            "transfer_in" => Some(Self::TransferIn),
            "transfer_out" => Some(Self::TransferOut),
            "loan" => Some(Self::Loan),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_kinds() {
        assert!(TransactionKind::Deposit.is_credit());
        assert!(TransactionKind::TransferIn.is_credit());
        assert!(TransactionKind::Loan.is_credit());
        assert!(TransactionKind::Withdrawal.is_debit());
        assert!(TransactionKind::TransferOut.is_debit());
    }

    #[test]
    fn test_parse_round_trip() {
        for kind in [
            TransactionKind::Deposit,
            TransactionKind::Withdrawal,
            TransactionKind::TransferIn,
            TransactionKind::TransferOut,
            TransactionKind::Loan,
        ] {
            assert_eq!(TransactionKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(TransactionKind::parse("refund"), None);
    }
}
