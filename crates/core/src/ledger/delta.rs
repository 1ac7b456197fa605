//! Delta application with overdraft rejection.
//!
//! The persistence layer wraps these functions in a database transaction with
//! an exclusive row lock; the math itself is pure so it can be tested without
//! a database.

use ferrum_shared::types::is_valid_amount;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::TransactionKind;

/// Combines direction and magnitude into a signed balance delta.
#[must_use]
pub fn signed_amount(kind: TransactionKind, magnitude: Decimal) -> Decimal {
    if kind.is_credit() {
        magnitude
    } else {
        -magnitude
    }
}

/// Computes the balance after applying a delta of `magnitude` in the
/// direction fixed by `kind`.
///
/// # Errors
///
/// - `InvalidAmount` when the magnitude is zero or negative
/// - `InsufficientFunds` when a debit would take the balance below zero
pub fn next_balance(
    current: Decimal,
    kind: TransactionKind,
    magnitude: Decimal,
) -> Result<Decimal, LedgerError> {
    if !is_valid_amount(magnitude) {
        return Err(LedgerError::InvalidAmount(magnitude));
    }

    let new_balance = current + signed_amount(kind, magnitude);
    if new_balance < Decimal::ZERO {
        return Err(LedgerError::InsufficientFunds {
            available: current,
            requested: magnitude,
        });
    }

    Ok(new_balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deposit_increases_balance() {
        let balance = next_balance(dec!(100), TransactionKind::Deposit, dec!(25.50)).unwrap();
        assert_eq!(balance, dec!(125.50));
    }

    #[test]
    fn test_withdrawal_decreases_balance() {
        let balance = next_balance(dec!(100), TransactionKind::Withdrawal, dec!(40)).unwrap();
        assert_eq!(balance, dec!(60));
    }

    #[test]
    fn test_withdrawal_to_exactly_zero_allowed() {
        let balance = next_balance(dec!(100), TransactionKind::Withdrawal, dec!(100)).unwrap();
        assert_eq!(balance, Decimal::ZERO);
    }

    #[test]
    fn test_overdraft_rejected() {
        let err = next_balance(dec!(100), TransactionKind::TransferOut, dec!(100.01)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                available: dec!(100),
                requested: dec!(100.01),
            }
        );
    }

    #[test]
    fn test_zero_and_negative_magnitudes_rejected() {
        assert_eq!(
            next_balance(dec!(100), TransactionKind::Deposit, Decimal::ZERO),
            Err(LedgerError::InvalidAmount(Decimal::ZERO))
        );
        assert_eq!(
            next_balance(dec!(100), TransactionKind::Deposit, dec!(-5)),
            Err(LedgerError::InvalidAmount(dec!(-5)))
        );
    }

    #[test]
    fn test_loan_disbursement_credits() {
        let balance = next_balance(dec!(0), TransactionKind::Loan, dec!(12000)).unwrap();
        assert_eq!(balance, dec!(12000));
    }
}
