//! Core business logic for Ferrum.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Balance delta math and the transaction-log audit walks
//! - `transfer` - OTP-gated two-step transfer state machine
//! - `withdrawal` - Admin-mediated withdrawal-request rules
//! - `loan` - Loan lifecycle rules and amortization
//! - `review` - Shared lifecycle for admin-resolved requests

pub mod ledger;
pub mod loan;
pub mod review;
pub mod transfer;
pub mod withdrawal;
