//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations and own
//! the atomic units of work: every multi-step money movement runs inside a
//! single database transaction begun here.

pub mod account;
pub mod ledger;
pub mod loan;
pub mod transfer;
pub mod withdrawal;

pub use account::{AccountError, AccountRepository, CreateAccountInput};
pub use ledger::{LedgerRepository, LedgerStoreError, TransactionFilter};
pub use loan::{CreateLoanInput, LoanRepository, LoanStoreError};
pub use transfer::{InitiateTransferInput, TransferRepository, TransferStoreError};
pub use withdrawal::{CreateWithdrawalInput, WithdrawalRepository, WithdrawalStoreError};
