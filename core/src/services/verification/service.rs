//! Verification token authority
//!
//! Issues, rate-limits, stores, and validates the one-time secrets used by
//! the email verification and password reset flows. Both flows share one
//! issuance/validation path parameterized by a [`TokenPolicy`].

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing;

use fb_shared::utils::email::{mask_email, normalize_email};

use crate::domain::entities::verification_token::{
    TokenPurpose, TokenStatus, VerificationToken,
};
use crate::errors::VerificationError;

use super::config::{TokenPolicy, VerificationServiceConfig};
use super::traits::{MailerService, TokenStore};
use super::types::IssueOutcome;

/// Verification service for one-time email secrets
///
/// All timer state (expiry, send cooldowns) is evaluated lazily against
/// wall-clock time on each call; there is no background sweeper. The store
/// is private to this service - every mutation flows through the operations
/// below.
pub struct VerificationService<M: MailerService, S: TokenStore> {
    /// Mail dispatch channel
    mailer: Arc<M>,
    /// Record and throttle storage
    store: Arc<S>,
    /// Per-flow policies
    config: VerificationServiceConfig,
}

impl<M: MailerService, S: TokenStore> VerificationService<M, S> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `mailer` - Mail dispatch implementation
    /// * `store` - Token and throttle storage implementation
    /// * `config` - Per-flow policy configuration
    pub fn new(mailer: Arc<M>, store: Arc<S>, config: VerificationServiceConfig) -> Self {
        Self {
            mailer,
            store,
            config,
        }
    }

    /// Issue a verification code for an email address
    ///
    /// The address is normalized (trimmed, lowercased) before use as a
    /// storage key; format validation is the caller's responsibility. Any
    /// previous code for the address is overwritten. Subject to the 60 s
    /// resend cooldown.
    ///
    /// # Returns
    ///
    /// * `Ok(IssueOutcome)` - Code generated, stored, and dispatched
    /// * `Err(VerificationError::RateLimited)` - Cooldown has not elapsed
    pub async fn send_verification_code(
        &self,
        email: &str,
    ) -> Result<IssueOutcome, VerificationError> {
        self.issue_secret(&self.config.code, email, "code_sent").await
    }

    /// Re-issue a verification code for an email address
    ///
    /// Identical to [`send_verification_code`](Self::send_verification_code)
    /// under the same cooldown, but always discards the previous record
    /// first: a resend invalidates the old code rather than extending its
    /// life, regardless of its remaining attempts or expiry.
    pub async fn resend_verification_code(
        &self,
        email: &str,
    ) -> Result<IssueOutcome, VerificationError> {
        self.issue_secret(&self.config.code, email, "code_resent").await
    }

    /// Validate a submitted verification code
    ///
    /// On success the record and its send-throttle entry are deleted, so a
    /// replay of the same code reports `NotFound` rather than a stale
    /// success.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Code matched; the caller may mark the address verified
    /// * `Err(VerificationError)` - `NotFound`, `Expired`, `TooManyAttempts`,
    ///   or `Mismatch` with the remaining attempt count
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<(), VerificationError> {
        self.verify_secret(&self.config.code, email, code).await
    }

    /// Issue a password reset token for an email address
    ///
    /// Reset records live in their own `reset:` namespace and never collide
    /// with a verification code for the same address. Subject to the 120 s
    /// resend cooldown.
    pub async fn send_password_reset(
        &self,
        email: &str,
    ) -> Result<IssueOutcome, VerificationError> {
        self.issue_secret(&self.config.reset, email, "reset_sent").await
    }

    /// Validate a submitted password reset token
    ///
    /// On success the record is kept in a verified-pending state until its
    /// natural expiry so the subsequent password update step can re-check
    /// it without re-transmitting the raw token. A verified-pending token
    /// rejects further verification with `AlreadyVerified`.
    pub async fn verify_reset_token(
        &self,
        email: &str,
        token: &str,
    ) -> Result<(), VerificationError> {
        self.verify_secret(&self.config.reset, email, token).await
    }

    /// Consume a previously verified reset token
    ///
    /// The password update step calls this instead of re-presenting the raw
    /// token. Only a verified-pending, unexpired record satisfies it; the
    /// record and its throttle entry are deleted on success. A record that
    /// was issued but never verified reports `NotFound`.
    pub async fn consume_reset_token(&self, email: &str) -> Result<(), VerificationError> {
        let normalized = normalize_email(email);
        let key = TokenPurpose::PasswordReset.storage_key(&normalized);

        let token = self
            .store
            .load(&key)
            .await
            .map_err(VerificationError::storage)?
            .ok_or(VerificationError::NotFound)?;

        if token.is_expired() {
            self.store
                .remove(&key)
                .await
                .map_err(VerificationError::storage)?;
            return Err(VerificationError::Expired);
        }

        if token.status != TokenStatus::VerifiedPending {
            return Err(VerificationError::NotFound);
        }

        self.store
            .remove(&key)
            .await
            .map_err(VerificationError::storage)?;
        self.store
            .clear_throttle(&key)
            .await
            .map_err(VerificationError::storage)?;

        tracing::info!(
            email = %mask_email(&normalized),
            event = "reset_token_consumed",
            "Password reset token consumed"
        );

        Ok(())
    }

    /// Check whether a live record exists for an address and purpose
    pub async fn secret_exists(
        &self,
        email: &str,
        purpose: TokenPurpose,
    ) -> Result<bool, VerificationError> {
        let normalized = normalize_email(email);
        let key = purpose.storage_key(&normalized);
        let token = self
            .store
            .load(&key)
            .await
            .map_err(VerificationError::storage)?;
        Ok(matches!(token, Some(t) if !t.is_expired()))
    }

    /// Shared issuance path: throttle check, generate, store, stamp, dispatch
    async fn issue_secret(
        &self,
        policy: &TokenPolicy,
        email: &str,
        event: &'static str,
    ) -> Result<IssueOutcome, VerificationError> {
        let normalized = normalize_email(email);
        let key = policy.purpose.storage_key(&normalized);
        let now = Utc::now();

        self.check_throttle(&key, policy, now).await?;

        // Overwrites any previous record: at most one live secret per key
        let token = VerificationToken::new(normalized.clone(), policy.purpose, policy.ttl_minutes);
        let secret = token.code.clone();
        let session_id = token.id;

        self.store
            .save(&key, token)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(&normalized),
                    error = %e,
                    event = "secret_storage_failed",
                    "Failed to store verification secret"
                );
                VerificationError::storage(e)
            })?;

        self.store
            .touch_sent(&key, now)
            .await
            .map_err(VerificationError::storage)?;

        tracing::info!(
            email = %mask_email(&normalized),
            event = event,
            session_id = %session_id,
            "Generated verification secret"
        );

        // Fire-and-forget dispatch: delivery failures are logged, not surfaced
        let dispatch = match policy.purpose {
            TokenPurpose::EmailVerification => {
                self.mailer.send_verification_code(&normalized, &secret).await
            }
            TokenPurpose::PasswordReset => {
                self.mailer.send_password_reset(&normalized, &secret).await
            }
        };
        let message_id = match dispatch {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(
                    email = %mask_email(&normalized),
                    error = %e,
                    event = "dispatch_failed",
                    "Mail dispatch failed; secret remains valid"
                );
                None
            }
        };

        Ok(IssueOutcome {
            message_id,
            expires_in_seconds: policy.expires_in_seconds(),
            next_resend_at: now + Duration::seconds(policy.resend_cooldown_seconds),
        })
    }

    /// Shared validation path
    ///
    /// Branch order: not found, expired, attempts exhausted, mismatch,
    /// match. Expired and exhausted records are deleted on discovery, so a
    /// follow-up call reports `NotFound`.
    async fn verify_secret(
        &self,
        policy: &TokenPolicy,
        email: &str,
        submitted: &str,
    ) -> Result<(), VerificationError> {
        let normalized = normalize_email(email);
        let key = policy.purpose.storage_key(&normalized);

        let mut token = self
            .store
            .load(&key)
            .await
            .map_err(VerificationError::storage)?
            .ok_or(VerificationError::NotFound)?;

        if token.is_expired() {
            self.store
                .remove(&key)
                .await
                .map_err(VerificationError::storage)?;
            tracing::info!(
                email = %mask_email(&normalized),
                event = "secret_expired",
                "Verification secret expired"
            );
            return Err(VerificationError::Expired);
        }

        // A verified-pending reset token no longer accepts verification
        if token.status == TokenStatus::VerifiedPending {
            return Err(VerificationError::AlreadyVerified);
        }

        if token.attempts >= policy.max_attempts {
            self.store
                .remove(&key)
                .await
                .map_err(VerificationError::storage)?;
            return Err(VerificationError::TooManyAttempts);
        }

        if !token.matches(submitted) {
            token.attempts += 1;
            if token.attempts >= policy.max_attempts {
                // Final wrong submission invalidates the record outright
                self.store
                    .remove(&key)
                    .await
                    .map_err(VerificationError::storage)?;
                tracing::warn!(
                    email = %mask_email(&normalized),
                    event = "max_attempts_exceeded",
                    "Maximum verification attempts exceeded"
                );
                return Err(VerificationError::TooManyAttempts);
            }

            let attempts_remaining = token.remaining_attempts(policy.max_attempts);
            self.store
                .save(&key, token)
                .await
                .map_err(VerificationError::storage)?;
            tracing::warn!(
                email = %mask_email(&normalized),
                event = "secret_mismatch",
                attempts_remaining = attempts_remaining,
                "Verification secret mismatch"
            );
            return Err(VerificationError::Mismatch { attempts_remaining });
        }

        if policy.retain_on_success {
            // Reset flow: keep the record for the password update step
            token.status = TokenStatus::VerifiedPending;
            self.store
                .save(&key, token)
                .await
                .map_err(VerificationError::storage)?;
        } else {
            self.store
                .remove(&key)
                .await
                .map_err(VerificationError::storage)?;
            if policy.clear_throttle_on_success {
                self.store
                    .clear_throttle(&key)
                    .await
                    .map_err(VerificationError::storage)?;
            }
        }

        tracing::info!(
            email = %mask_email(&normalized),
            event = "secret_verified",
            "Verification secret accepted"
        );

        Ok(())
    }

    /// Reject issuance while the resend cooldown is running
    async fn check_throttle(
        &self,
        key: &str,
        policy: &TokenPolicy,
        now: DateTime<Utc>,
    ) -> Result<(), VerificationError> {
        let last_sent = self
            .store
            .last_sent_at(key)
            .await
            .map_err(VerificationError::storage)?;

        if let Some(sent_at) = last_sent {
            let elapsed = (now - sent_at).num_seconds();
            if elapsed < policy.resend_cooldown_seconds {
                let retry_after_seconds =
                    (policy.resend_cooldown_seconds - elapsed).max(1);
                tracing::warn!(
                    event = "rate_limit_exceeded",
                    retry_after_seconds = retry_after_seconds,
                    "Secret issuance request inside cooldown window"
                );
                return Err(VerificationError::RateLimited {
                    retry_after_seconds,
                });
            }
        }

        Ok(())
    }
}
