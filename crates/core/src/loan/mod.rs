//! Loan lifecycle rules and amortization.
//!
//! A loan is applied for against a linked account, reviewed by an admin,
//! and on approval the principal is credited to the account while the fixed
//! amortized monthly payment is computed and stored.

pub mod amortization;
pub mod error;
pub mod rules;

pub use amortization::monthly_payment;
pub use error::LoanError;
pub use rules::{ensure_loan_capacity, MAX_ACTIVE_LOANS};
