//! One-time passcode verification.
//!
//! Passcode generation lives in the persistence layer (it needs a RNG);
//! verification is pure so the expiry and mismatch rules can be tested
//! without a database or a clock.

use chrono::{DateTime, Utc};

use super::error::TransferError;

/// Verifies a submitted passcode against the stored code and expiry.
///
/// Expiry is checked first: a correct code submitted after the window has
/// lapsed is still rejected, and must never become confirmable again.
///
/// # Errors
///
/// - `OtpExpired` when `now` is at or past `expires_at`
/// - `InvalidOtp` when the submitted code does not match
pub fn verify_otp(
    stored: &str,
    expires_at: DateTime<Utc>,
    submitted: &str,
    now: DateTime<Utc>,
) -> Result<(), TransferError> {
    if now >= expires_at {
        return Err(TransferError::OtpExpired);
    }
    if stored != submitted {
        return Err(TransferError::InvalidOtp);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn window(now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::minutes(5)
    }

    #[test]
    fn test_correct_code_within_window() {
        let now = Utc::now();
        assert_eq!(verify_otp("493021", window(now), "493021", now), Ok(()));
    }

    #[test]
    fn test_wrong_code_rejected() {
        let now = Utc::now();
        assert_eq!(
            verify_otp("493021", window(now), "493022", now),
            Err(TransferError::InvalidOtp)
        );
    }

    #[test]
    fn test_expired_code_rejected_even_when_correct() {
        let now = Utc::now();
        let expired = now - Duration::seconds(1);
        assert_eq!(
            verify_otp("493021", expired, "493021", now),
            Err(TransferError::OtpExpired)
        );
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        // The instant of expiry itself is no longer confirmable.
        let now = Utc::now();
        assert_eq!(
            verify_otp("493021", now, "493021", now),
            Err(TransferError::OtpExpired)
        );
        // One second before expiry still is.
        assert_eq!(
            verify_otp("493021", now + Duration::seconds(1), "493021", now),
            Ok(())
        );
    }

    #[test]
    fn test_expiry_wins_over_mismatch() {
        let now = Utc::now();
        let expired = now - Duration::minutes(10);
        assert_eq!(
            verify_otp("493021", expired, "000000", now),
            Err(TransferError::OtpExpired)
        );
    }
}
