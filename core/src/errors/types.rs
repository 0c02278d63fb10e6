//! Error types for the verification token flows
//!
//! Every failure a verification operation can produce is an expected,
//! recoverable outcome represented as a typed variant; the service never
//! panics for these conditions. `Internal` is reserved for storage faults
//! and carries a "please try again" semantic for the caller.

use thiserror::Error;

/// Outcomes of verification code and reset token operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// Issuance requested before the cooldown elapsed
    #[error("Please wait {retry_after_seconds} seconds before requesting a new code")]
    RateLimited { retry_after_seconds: i64 },

    /// No live record for the key: never issued, consumed, or invalidated
    #[error("No active verification code found")]
    NotFound,

    /// The record existed but its expiry has passed
    #[error("Verification code has expired")]
    Expired,

    /// The record had already reached its attempt ceiling
    #[error("Maximum verification attempts exceeded")]
    TooManyAttempts,

    /// Submitted secret does not match; the attempt counter was incremented
    #[error("Invalid verification code. {attempts_remaining} attempt(s) remaining")]
    Mismatch { attempts_remaining: i32 },

    /// A reset token awaiting consumption cannot be verified again
    #[error("Token has already been verified")]
    AlreadyVerified,

    /// Unexpected storage fault; the caller should retry
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl VerificationError {
    /// Wrap a storage-layer failure message
    pub fn storage(message: impl Into<String>) -> Self {
        VerificationError::Internal {
            message: message.into(),
        }
    }
}
