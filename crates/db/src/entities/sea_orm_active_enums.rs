//! `SeaORM` active enums mapped to the Postgres enum types.
//!
//! Conversions to and from the `ferrum-core` domain enums live here so the
//! repositories can hand pure values to the core rules.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Savings account.
    #[sea_orm(string_value = "savings")]
    Savings,
    /// Current (checking) account.
    #[sea_orm(string_value = "current")]
    Current,
}

/// Account lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_status")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account can move funds.
    #[sea_orm(string_value = "active")]
    Active,
    /// Account is closed to ledger operations.
    #[sea_orm(string_value = "inactive")]
    Inactive,
    /// Account is administratively frozen.
    #[sea_orm(string_value = "frozen")]
    Frozen,
}

/// Kind of a balance-changing event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Funds paid into the account.
    #[sea_orm(string_value = "deposit")]
    Deposit,
    /// Funds taken out of the account.
    #[sea_orm(string_value = "withdrawal")]
    Withdrawal,
    /// Incoming transfer leg.
    #[sea_orm(string_value = "transfer_in")]
    TransferIn,
    /// Outgoing transfer leg.
    #[sea_orm(string_value = "transfer_out")]
    TransferOut,
    /// Loan disbursement credit.
    #[sea_orm(string_value = "loan")]
    Loan,
}

/// Status of a two-step transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transfer_status")]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Awaiting passcode confirmation.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Both ledger legs committed.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Confirmation failed or passcode window lapsed.
    #[sea_orm(string_value = "failed")]
    Failed,
}

/// Review status of an admin-resolved request (withdrawal requests, loans).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "review_status")]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// Awaiting an admin decision.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved by the assigned admin.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected by the assigned admin.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl From<ferrum_core::ledger::TransactionKind> for TransactionKind {
    fn from(kind: ferrum_core::ledger::TransactionKind) -> Self {
        use ferrum_core::ledger::TransactionKind as Core;
        match kind {
            Core::Deposit => Self::Deposit,
            Core::Withdrawal => Self::Withdrawal,
            Core::TransferIn => Self::TransferIn,
            Core::TransferOut => Self::TransferOut,
            Core::Loan => Self::Loan,
        }
    }
}

impl From<TransactionKind> for ferrum_core::ledger::TransactionKind {
    fn from(kind: TransactionKind) -> Self {
        use TransactionKind as Db;
        match kind {
            Db::Deposit => Self::Deposit,
            Db::Withdrawal => Self::Withdrawal,
            Db::TransferIn => Self::TransferIn,
            Db::TransferOut => Self::TransferOut,
            Db::Loan => Self::Loan,
        }
    }
}

impl From<TransferStatus> for ferrum_core::transfer::TransferStatus {
    fn from(status: TransferStatus) -> Self {
        match status {
            TransferStatus::Pending => Self::Pending,
            TransferStatus::Completed => Self::Completed,
            TransferStatus::Failed => Self::Failed,
        }
    }
}

impl From<ferrum_core::transfer::TransferStatus> for TransferStatus {
    fn from(status: ferrum_core::transfer::TransferStatus) -> Self {
        use ferrum_core::transfer::TransferStatus as Core;
        match status {
            Core::Pending => Self::Pending,
            Core::Completed => Self::Completed,
            Core::Failed => Self::Failed,
        }
    }
}

impl From<ReviewStatus> for ferrum_core::review::ReviewStatus {
    fn from(status: ReviewStatus) -> Self {
        match status {
            ReviewStatus::Pending => Self::Pending,
            ReviewStatus::Approved => Self::Approved,
            ReviewStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<ferrum_core::review::ReviewStatus> for ReviewStatus {
    fn from(status: ferrum_core::review::ReviewStatus) -> Self {
        use ferrum_core::review::ReviewStatus as Core;
        match status {
            Core::Pending => Self::Pending,
            Core::Approved => Self::Approved,
            Core::Rejected => Self::Rejected,
        }
    }
}
