//! Verification token entity for email verification and password reset.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of an email verification code
pub const CODE_LENGTH: usize = 6;

/// Length of a password reset token (two concatenated code segments)
pub const RESET_TOKEN_LENGTH: usize = 12;

/// Maximum number of verification attempts for an email code
pub const MAX_CODE_ATTEMPTS: i32 = 5;

/// Maximum number of verification attempts for a reset token
pub const MAX_RESET_ATTEMPTS: i32 = 3;

/// Default expiration time for verification codes (15 minutes)
pub const CODE_EXPIRATION_MINUTES: i64 = 15;

/// Default expiration time for reset tokens (30 minutes)
pub const RESET_EXPIRATION_MINUTES: i64 = 30;

/// Purpose a one-time secret was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Proving control of an email address
    EmailVerification,
    /// Authorizing a password reset
    PasswordReset,
}

impl TokenPurpose {
    /// Storage key prefix for this purpose.
    ///
    /// Verification codes are filed under the bare normalized email; reset
    /// tokens use a `reset:` namespace so a code and a reset token for the
    /// same address never collide.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            TokenPurpose::EmailVerification => "",
            TokenPurpose::PasswordReset => "reset:",
        }
    }

    /// Build the storage key for a normalized email address
    pub fn storage_key(&self, normalized_email: &str) -> String {
        format!("{}{}", self.key_prefix(), normalized_email)
    }

    /// Secret length for this purpose
    pub fn secret_length(&self) -> usize {
        match self {
            TokenPurpose::EmailVerification => CODE_LENGTH,
            TokenPurpose::PasswordReset => RESET_TOKEN_LENGTH,
        }
    }
}

/// Lifecycle state of a verification token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenStatus {
    /// Issued and accepting validation attempts
    Active,
    /// Reset token verified; retained until expiry for the password update step
    VerifiedPending,
}

/// One-time secret issued for email verification or password reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    /// Unique identifier for this issuance
    pub id: Uuid,

    /// Normalized email address the secret was sent to
    pub email: String,

    /// Purpose the secret was issued for
    pub purpose: TokenPurpose,

    /// The secret value the caller must present back
    pub code: String,

    /// Number of failed validation attempts made
    pub attempts: i32,

    /// Lifecycle state
    pub status: TokenStatus,

    /// Timestamp when the secret was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the secret expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationToken {
    /// Creates a new token with a freshly generated secret for the given purpose
    ///
    /// # Arguments
    ///
    /// * `email` - The normalized email address the secret is issued for
    /// * `purpose` - What the secret authorizes
    /// * `expiration_minutes` - Number of minutes until the secret expires
    pub fn new(email: String, purpose: TokenPurpose, expiration_minutes: i64) -> Self {
        let code = match purpose {
            TokenPurpose::EmailVerification => Self::generate_code(),
            TokenPurpose::PasswordReset => Self::generate_reset_token(),
        };
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            email,
            purpose,
            code,
            attempts: 0,
            status: TokenStatus::Active,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
        }
    }

    /// Generates a random 6-digit code using the OS CSPRNG
    ///
    /// Codes are drawn uniformly from `[100000, 999999]`, so every code is
    /// exactly six digits with no leading zero.
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(100_000..=999_999);
        code.to_string()
    }

    /// Generates a random 12-digit reset token (two concatenated code segments)
    pub fn generate_reset_token() -> String {
        format!("{}{}", Self::generate_code(), Self::generate_code())
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Compares a submitted secret against the stored one in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        if self.code.len() != submitted.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Gets the number of remaining validation attempts under `max_attempts`
    pub fn remaining_attempts(&self, max_attempts: i32) -> i32 {
        (max_attempts - self.attempts).max(0)
    }

    /// Legacy attempts view: `-1` once a reset token is verified-pending,
    /// the live failure counter otherwise.
    pub fn attempt_marker(&self) -> i32 {
        match self.status {
            TokenStatus::Active => self.attempts,
            TokenStatus::VerifiedPending => -1,
        }
    }

    /// Storage key this token is filed under
    pub fn storage_key(&self) -> String {
        self.purpose.storage_key(&self.email)
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
