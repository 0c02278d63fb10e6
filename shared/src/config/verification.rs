//! Verification policy configuration module

use serde::{Deserialize, Serialize};

/// Verification and password reset policy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Email verification code policy
    #[serde(default = "default_code_policy")]
    pub code: TokenPolicyConfig,

    /// Password reset token policy
    #[serde(default = "default_reset_policy")]
    pub reset: TokenPolicyConfig,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code: default_code_policy(),
            reset: default_reset_policy(),
        }
    }
}

/// Policy parameters for one kind of one-time secret
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenPolicyConfig {
    /// Minutes before an issued secret expires
    pub ttl_minutes: i64,

    /// Max failed validation attempts per issued secret
    pub max_attempts: i32,

    /// Cooldown period between issuance requests in seconds
    pub resend_cooldown_seconds: i64,
}

fn default_code_policy() -> TokenPolicyConfig {
    TokenPolicyConfig {
        ttl_minutes: 15,
        max_attempts: 5,
        resend_cooldown_seconds: 60,
    }
}

fn default_reset_policy() -> TokenPolicyConfig {
    TokenPolicyConfig {
        ttl_minutes: 30,
        max_attempts: 3,
        resend_cooldown_seconds: 120,
    }
}
