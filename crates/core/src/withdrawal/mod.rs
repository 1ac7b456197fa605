//! Admin-mediated withdrawal-request rules.
//!
//! A withdrawal request records an intent to withdraw without reserving
//! funds. Only the admin assigned at request time may resolve it, and an
//! approval re-validates the live balance before any debit.

pub mod error;
pub mod rules;

pub use error::WithdrawalError;
pub use rules::{ensure_assigned_admin, ensure_pending, Decision};
