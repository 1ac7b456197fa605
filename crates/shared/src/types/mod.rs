//! Shared domain types.

pub mod money;

pub use money::{is_valid_amount, round_currency, CURRENCY_DP};
