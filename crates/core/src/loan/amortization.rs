//! Amortized monthly payment calculation.
//!
//! Standard fixed-payment amortization:
//! `M = P * r * (1+r)^n / ((1+r)^n - 1)` with monthly rate `r = annual/100/12`
//! and term `n` in months. A zero-rate loan degenerates to `M = P / n`.
//!
//! All arithmetic stays in `Decimal`; the integer power is computed by
//! squaring rather than through any float path.

use rust_decimal::Decimal;

use super::error::LoanError;
use ferrum_shared::types::round_currency;

/// Months per year as a `Decimal` divisor (100 * 12 folded together).
const PERCENT_MONTHS: u32 = 1200;

/// Computes the fixed monthly payment that retires `principal` plus interest
/// at `annual_rate_percent` over `term_months`, rounded to currency precision.
///
/// # Errors
///
/// - `InvalidPrincipal` when the principal is zero or negative
/// - `InvalidTerm` when the term is zero months
/// - `InvalidRate` when the annual rate is negative
pub fn monthly_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Result<Decimal, LoanError> {
    if principal <= Decimal::ZERO {
        return Err(LoanError::InvalidPrincipal(principal));
    }
    if term_months == 0 {
        return Err(LoanError::InvalidTerm(term_months));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(LoanError::InvalidRate(annual_rate_percent));
    }

    let n = Decimal::from(term_months);
    if annual_rate_percent.is_zero() {
        return Ok(round_currency(principal / n));
    }

    let monthly_rate = annual_rate_percent / Decimal::from(PERCENT_MONTHS);
    let growth = pow_decimal(Decimal::ONE + monthly_rate, term_months);
    let payment = principal * monthly_rate * growth / (growth - Decimal::ONE);

    Ok(round_currency(payment))
}

/// Integer power by squaring, staying entirely in `Decimal`.
fn pow_decimal(base: Decimal, mut exp: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let mut factor = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result *= factor;
        }
        exp >>= 1;
        if exp > 0 {
            factor *= factor;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_amortization() {
        // 12000 at 6% annual over 12 months: r = 0.005, (1.005)^12 = 1.0616778...
        // M = 12000 * 0.005 * 1.0616778 / 0.0616778 = 1032.7972 -> 1032.80
        let payment = monthly_payment(dec!(12000), dec!(6.0), 12).unwrap();
        assert_eq!(payment, dec!(1032.80));
    }

    #[test]
    fn test_zero_rate_is_straight_division() {
        let payment = monthly_payment(dec!(12000), Decimal::ZERO, 12).unwrap();
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_longer_term_lowers_payment() {
        let short = monthly_payment(dec!(10000), dec!(5.0), 12).unwrap();
        let long = monthly_payment(dec!(10000), dec!(5.0), 60).unwrap();
        assert!(long < short);
    }

    #[test]
    fn test_single_month_term() {
        // One payment retires principal plus one month of interest.
        let payment = monthly_payment(dec!(1200), dec!(12.0), 1).unwrap();
        assert_eq!(payment, dec!(1212.00));
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            monthly_payment(Decimal::ZERO, dec!(5.0), 12),
            Err(LoanError::InvalidPrincipal(Decimal::ZERO))
        );
        assert_eq!(
            monthly_payment(dec!(-100), dec!(5.0), 12),
            Err(LoanError::InvalidPrincipal(dec!(-100)))
        );
        assert_eq!(
            monthly_payment(dec!(1000), dec!(5.0), 0),
            Err(LoanError::InvalidTerm(0))
        );
        assert_eq!(
            monthly_payment(dec!(1000), dec!(-1.0), 12),
            Err(LoanError::InvalidRate(dec!(-1.0)))
        );
    }

    #[test]
    fn test_pow_decimal() {
        assert_eq!(pow_decimal(dec!(1.005), 0), Decimal::ONE);
        assert_eq!(pow_decimal(dec!(1.005), 1), dec!(1.005));
        assert_eq!(pow_decimal(dec!(1.005), 2), dec!(1.010025));
        assert_eq!(pow_decimal(dec!(2), 10), dec!(1024));
    }

    #[test]
    fn test_payments_roughly_cover_principal_and_interest() {
        // Total paid over the term must exceed the principal for any positive rate.
        let payment = monthly_payment(dec!(5000), dec!(8.5), 24).unwrap();
        let total = payment * dec!(24);
        assert!(total > dec!(5000));
        // ...but stays below naive simple interest for the full term.
        assert!(total < dec!(5000) * (Decimal::ONE + dec!(0.085) * dec!(2)));
    }
}
