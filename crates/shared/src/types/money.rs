//! Currency amount helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal` rounded to 2 decimal places.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places carried by ledger amounts.
pub const CURRENCY_DP: u32 = 2;

/// Rounds an amount to currency precision using Banker's Rounding.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointNearestEven)
}

/// Returns true if the amount is a valid operation magnitude (strictly positive).
#[must_use]
pub fn is_valid_amount(amount: Decimal) -> bool {
    amount > Decimal::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_currency_two_places() {
        assert_eq!(round_currency(dec!(10.126)), dec!(10.13));
        assert_eq!(round_currency(dec!(10.124)), dec!(10.12));
        assert_eq!(round_currency(dec!(10)), dec!(10.00));
    }

    #[test]
    fn test_round_currency_bankers_midpoint() {
        // Midpoints round to the even neighbour
        assert_eq!(round_currency(dec!(10.125)), dec!(10.12));
        assert_eq!(round_currency(dec!(10.135)), dec!(10.14));
    }

    #[test]
    fn test_is_valid_amount() {
        assert!(is_valid_amount(dec!(0.01)));
        assert!(is_valid_amount(dec!(1000)));
        assert!(!is_valid_amount(Decimal::ZERO));
        assert!(!is_valid_amount(dec!(-5)));
    }
}
