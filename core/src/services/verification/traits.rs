//! Traits for mail dispatch and token storage integration

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::verification_token::VerificationToken;

/// Trait for outbound mail dispatch
///
/// Dispatch is fire-and-forget from the verification service's point of
/// view: delivery failures are logged and swallowed, never surfaced to the
/// user flow.
#[async_trait]
pub trait MailerService: Send + Sync {
    /// Send a verification code email; returns a provider message id
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String>;

    /// Send a password reset email; returns a provider message id
    async fn send_password_reset(&self, email: &str, token: &str) -> Result<String, String>;
}

/// Trait for token record and send-throttle storage
///
/// Records and throttle stamps are two separate maps sharing the same key
/// space: a throttle entry must be able to outlive its record.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the token record stored under a key
    async fn load(&self, key: &str) -> Result<Option<VerificationToken>, String>;

    /// Store a token record under a key, replacing any existing one
    async fn save(&self, key: &str, token: VerificationToken) -> Result<(), String>;

    /// Delete the token record stored under a key
    async fn remove(&self, key: &str) -> Result<(), String>;

    /// When a secret was last dispatched for a key
    async fn last_sent_at(&self, key: &str) -> Result<Option<DateTime<Utc>>, String>;

    /// Record a dispatch time for a key
    async fn touch_sent(&self, key: &str, sent_at: DateTime<Utc>) -> Result<(), String>;

    /// Drop the throttle entry for a key
    async fn clear_throttle(&self, key: &str) -> Result<(), String>;
}
