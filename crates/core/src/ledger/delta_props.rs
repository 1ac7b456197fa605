//! Property tests for delta application.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::replay_balance;
use super::delta::{next_balance, signed_amount};
use super::error::LedgerError;
use super::types::TransactionKind;

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn kind_strategy() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![
        Just(TransactionKind::Deposit),
        Just(TransactionKind::Withdrawal),
        Just(TransactionKind::TransferIn),
        Just(TransactionKind::TransferOut),
        Just(TransactionKind::Loan),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Applying any accepted delta never takes the balance below zero.
    #[test]
    fn prop_no_overdraft(
        current in amount_strategy(),
        kind in kind_strategy(),
        magnitude in amount_strategy(),
    ) {
        match next_balance(current, kind, magnitude) {
            Ok(balance) => prop_assert!(balance >= Decimal::ZERO),
            Err(LedgerError::InsufficientFunds { available, requested }) => {
                prop_assert!(kind.is_debit());
                prop_assert_eq!(available, current);
                prop_assert_eq!(requested, magnitude);
                prop_assert!(magnitude > current);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    /// An accepted delta moves the balance by exactly the signed amount.
    #[test]
    fn prop_delta_is_exact(
        current in amount_strategy(),
        kind in kind_strategy(),
        magnitude in amount_strategy(),
    ) {
        if let Ok(balance) = next_balance(current, kind, magnitude) {
            prop_assert_eq!(balance - current, signed_amount(kind, magnitude));
        }
    }

    /// Replaying a log of accepted deltas reproduces the running balance.
    ///
    /// This is the core ledger invariant: balance == sum of committed deltas.
    #[test]
    fn prop_replay_matches_running_balance(
        ops in prop::collection::vec((kind_strategy(), amount_strategy()), 0..40),
    ) {
        let mut balance = Decimal::ZERO;
        let mut committed = Vec::new();

        for (kind, magnitude) in ops {
            if let Ok(next) = next_balance(balance, kind, magnitude) {
                balance = next;
                committed.push((kind, magnitude));
            }
            // Rejected deltas leave both the balance and the log untouched.
        }

        prop_assert_eq!(replay_balance(committed), balance);
    }

    /// Zero and negative magnitudes are always rejected, for every kind.
    #[test]
    fn prop_non_positive_rejected(
        current in amount_strategy(),
        kind in kind_strategy(),
        magnitude in -10_000i64..=0i64,
    ) {
        let magnitude = Decimal::new(magnitude, 2);
        prop_assert_eq!(
            next_balance(current, kind, magnitude),
            Err(LedgerError::InvalidAmount(magnitude))
        );
    }
}
