//! Balance delta math underlying all money movement.
//!
//! This module implements the pure side of the ledger engine:
//! - Transaction kinds and their balance direction
//! - Delta application with overdraft rejection
//! - Audit walks over the transaction log (replay, statement opening balance)
//! - Error types for ledger operations

pub mod balance;
pub mod delta;
pub mod error;
pub mod types;

#[cfg(test)]
mod delta_props;

pub use balance::{opening_balance, replay_balance};
pub use delta::{next_balance, signed_amount};
pub use error::LedgerError;
pub use types::TransactionKind;
