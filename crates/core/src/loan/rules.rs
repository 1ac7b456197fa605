//! Loan application rules.

use super::error::LoanError;

/// Maximum loans a user may hold in pending or approved state at once.
pub const MAX_ACTIVE_LOANS: u64 = 2;

/// Enforced at application time, before a new loan row is created.
///
/// # Errors
///
/// Returns `MaxLoansExceeded` when the user is already at the limit.
pub fn ensure_loan_capacity(open_loans: u64) -> Result<(), LoanError> {
    if open_loans >= MAX_ACTIVE_LOANS {
        return Err(LoanError::MaxLoansExceeded(open_loans));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under_limit_allowed() {
        assert_eq!(ensure_loan_capacity(0), Ok(()));
        assert_eq!(ensure_loan_capacity(1), Ok(()));
    }

    #[test]
    fn test_at_and_over_limit_rejected() {
        assert_eq!(ensure_loan_capacity(2), Err(LoanError::MaxLoansExceeded(2)));
        assert_eq!(ensure_loan_capacity(5), Err(LoanError::MaxLoansExceeded(5)));
    }
}
