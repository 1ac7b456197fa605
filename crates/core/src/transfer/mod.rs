//! OTP-gated two-step transfer state machine.
//!
//! A transfer is created `pending` with a one-time passcode and a short
//! validity window. Funds only move at confirmation, after the passcode and
//! the live source balance have been re-validated.

pub mod error;
pub mod otp;
pub mod types;

pub use error::TransferError;
pub use otp::verify_otp;
pub use types::{TransferStatus, DEFAULT_OTP_TTL_SECS, OTP_DIGITS};
