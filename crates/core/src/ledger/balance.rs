//! Audit walks over the transaction log.
//!
//! The account balance is authoritative in the store, but it must always
//! equal the sum of committed transaction deltas. These helpers replay the
//! log forward (audit) and backward (statement opening balance).

use rust_decimal::Decimal;

use super::delta::signed_amount;
use super::types::TransactionKind;

/// Replays a sequence of `(kind, amount)` deltas from a zero balance.
///
/// For a well-formed log this equals the account's stored balance.
#[must_use]
pub fn replay_balance<I>(deltas: I) -> Decimal
where
    I: IntoIterator<Item = (TransactionKind, Decimal)>,
{
    deltas
        .into_iter()
        .map(|(kind, amount)| signed_amount(kind, amount))
        .sum()
}

/// Walks backward from the closing balance to the balance at a statement's
/// start, given the deltas that happened after that start.
#[must_use]
pub fn opening_balance<I>(closing: Decimal, deltas_after_start: I) -> Decimal
where
    I: IntoIterator<Item = (TransactionKind, Decimal)>,
{
    closing - replay_balance(deltas_after_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_replay_empty_log_is_zero() {
        assert_eq!(replay_balance(std::iter::empty()), Decimal::ZERO);
    }

    #[test]
    fn test_replay_mixed_deltas() {
        let log = vec![
            (TransactionKind::Deposit, dec!(500)),
            (TransactionKind::Withdrawal, dec!(120)),
            (TransactionKind::TransferOut, dec!(80)),
            (TransactionKind::Loan, dec!(1000)),
        ];
        assert_eq!(replay_balance(log), dec!(1300));
    }

    #[test]
    fn test_opening_balance_undoes_later_activity() {
        // Closing balance 1300 after a 1000 loan credit and a 200 withdrawal
        // means the statement opened at 500.
        let later = vec![
            (TransactionKind::Loan, dec!(1000)),
            (TransactionKind::Withdrawal, dec!(200)),
        ];
        assert_eq!(opening_balance(dec!(1300), later), dec!(500));
    }

    #[test]
    fn test_opening_equals_closing_with_no_activity() {
        assert_eq!(
            opening_balance(dec!(42.42), std::iter::empty()),
            dec!(42.42)
        );
    }
}
