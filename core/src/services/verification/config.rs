//! Configuration for the verification service

use fb_shared::config::verification::{TokenPolicyConfig, VerificationConfig};

use crate::domain::entities::verification_token::{
    TokenPurpose, CODE_EXPIRATION_MINUTES, MAX_CODE_ATTEMPTS, MAX_RESET_ATTEMPTS,
    RESET_EXPIRATION_MINUTES,
};

/// Default cooldown between verification code sends (seconds)
pub const CODE_RESEND_COOLDOWN_SECONDS: i64 = 60;

/// Default cooldown between password reset sends (seconds)
pub const RESET_RESEND_COOLDOWN_SECONDS: i64 = 120;

/// Policy parameters for one kind of one-time secret
///
/// Both flows run through the same issuance and validation code path; the
/// two policies are the only thing that differs between them.
#[derive(Debug, Clone)]
pub struct TokenPolicy {
    /// The purpose this policy governs
    pub purpose: TokenPurpose,

    /// Minutes before an issued secret expires
    pub ttl_minutes: i64,

    /// Maximum failed validation attempts per issued secret
    pub max_attempts: i32,

    /// Minimum seconds between issuance requests for one address
    pub resend_cooldown_seconds: i64,

    /// Keep the record in a verified-pending state on success instead of
    /// deleting it (reset flow: a later password-update step re-checks it)
    pub retain_on_success: bool,

    /// Drop the send throttle entry when validation succeeds
    pub clear_throttle_on_success: bool,
}

impl TokenPolicy {
    /// Policy for email verification codes
    pub fn email_verification() -> Self {
        Self {
            purpose: TokenPurpose::EmailVerification,
            ttl_minutes: CODE_EXPIRATION_MINUTES,
            max_attempts: MAX_CODE_ATTEMPTS,
            resend_cooldown_seconds: CODE_RESEND_COOLDOWN_SECONDS,
            retain_on_success: false,
            clear_throttle_on_success: true,
        }
    }

    /// Policy for password reset tokens
    pub fn password_reset() -> Self {
        Self {
            purpose: TokenPurpose::PasswordReset,
            ttl_minutes: RESET_EXPIRATION_MINUTES,
            max_attempts: MAX_RESET_ATTEMPTS,
            resend_cooldown_seconds: RESET_RESEND_COOLDOWN_SECONDS,
            retain_on_success: true,
            clear_throttle_on_success: true,
        }
    }

    /// Seconds until an issued secret expires
    pub fn expires_in_seconds(&self) -> i64 {
        self.ttl_minutes * 60
    }
}

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Email verification code policy
    pub code: TokenPolicy,

    /// Password reset token policy
    pub reset: TokenPolicy,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code: TokenPolicy::email_verification(),
            reset: TokenPolicy::password_reset(),
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code: apply(TokenPolicy::email_verification(), &config.code),
            reset: apply(TokenPolicy::password_reset(), &config.reset),
        }
    }
}

fn apply(mut policy: TokenPolicy, config: &TokenPolicyConfig) -> TokenPolicy {
    policy.ttl_minutes = config.ttl_minutes;
    policy.max_attempts = config.max_attempts;
    policy.resend_cooldown_seconds = config.resend_cooldown_seconds;
    policy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies() {
        let config = VerificationServiceConfig::default();

        assert_eq!(config.code.ttl_minutes, 15);
        assert_eq!(config.code.max_attempts, 5);
        assert_eq!(config.code.resend_cooldown_seconds, 60);
        assert_eq!(config.code.expires_in_seconds(), 900);
        assert!(!config.code.retain_on_success);

        assert_eq!(config.reset.ttl_minutes, 30);
        assert_eq!(config.reset.max_attempts, 3);
        assert_eq!(config.reset.resend_cooldown_seconds, 120);
        assert_eq!(config.reset.expires_in_seconds(), 1800);
        assert!(config.reset.retain_on_success);
    }

    #[test]
    fn test_from_shared_config() {
        let mut shared = VerificationConfig::default();
        shared.code.ttl_minutes = 5;
        shared.reset.resend_cooldown_seconds = 300;

        let config = VerificationServiceConfig::from(&shared);
        assert_eq!(config.code.ttl_minutes, 5);
        assert_eq!(config.reset.resend_cooldown_seconds, 300);
        // Success behavior is policy-shaped, not configurable
        assert!(config.reset.retain_on_success);
    }
}
