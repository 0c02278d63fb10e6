//! Account service coordinating verification flows with the directory

use std::sync::Arc;

use chrono::Utc;
use tracing;

use fb_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::errors::{DomainError, DomainResult};
use crate::repositories::AccountDirectory;
use crate::services::verification::{
    IssueOutcome, MailerService, TokenStore, VerificationService,
};

use super::config::AccountServiceConfig;

/// Account-facing use cases built on top of the verification service
///
/// The verification service stays pure token logic; this service is the
/// caller that reports outcomes into the account directory.
pub struct AccountService<D, M, S>
where
    D: AccountDirectory,
    M: MailerService,
    S: TokenStore,
{
    directory: Arc<D>,
    verification: Arc<VerificationService<M, S>>,
    config: AccountServiceConfig,
}

impl<D, M, S> AccountService<D, M, S>
where
    D: AccountDirectory,
    M: MailerService,
    S: TokenStore,
{
    /// Create a new account service
    pub fn new(
        directory: Arc<D>,
        verification: Arc<VerificationService<M, S>>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            directory,
            verification,
            config,
        }
    }

    /// Request an email verification code for an existing account
    pub async fn request_email_verification(&self, email: &str) -> DomainResult<IssueOutcome> {
        let normalized = self.validated(email)?;
        self.require_account(&normalized).await?;

        let outcome = self.verification.send_verification_code(&normalized).await?;
        Ok(outcome)
    }

    /// Confirm an email address with a submitted code
    ///
    /// On success the directory's verified flag is flipped with the
    /// verification time.
    pub async fn confirm_email(&self, email: &str, code: &str) -> DomainResult<()> {
        let normalized = normalize_email(email);

        self.verification.verify_code(&normalized, code).await?;
        self.directory
            .mark_email_verified(&normalized, Utc::now())
            .await?;

        tracing::info!(
            email = %mask_email(&normalized),
            event = "email_confirmed",
            "Email address confirmed"
        );
        Ok(())
    }

    /// Request a password reset token for an existing account
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<IssueOutcome> {
        let normalized = self.validated(email)?;
        self.require_account(&normalized).await?;

        let outcome = self.verification.send_password_reset(&normalized).await?;
        Ok(outcome)
    }

    /// Check a submitted reset token without consuming it
    ///
    /// The token moves to its verified-pending state; the password change
    /// itself happens in [`complete_password_reset`](Self::complete_password_reset).
    pub async fn verify_password_reset(&self, email: &str, token: &str) -> DomainResult<()> {
        let normalized = normalize_email(email);
        self.verification.verify_reset_token(&normalized, token).await?;
        Ok(())
    }

    /// Set a new password after a verified reset token
    ///
    /// Consumes the verified-pending token, hashes the new password with
    /// bcrypt, and stores the hash in the directory.
    pub async fn complete_password_reset(
        &self,
        email: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let normalized = normalize_email(email);

        if new_password.len() < self.config.min_password_length {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be at least {} characters",
                    self.config.min_password_length
                ),
            });
        }

        self.verification.consume_reset_token(&normalized).await?;

        let hash = bcrypt::hash(new_password, self.config.bcrypt_cost).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to hash password: {}", e),
            }
        })?;
        self.directory
            .update_password_hash(&normalized, hash)
            .await?;

        tracing::info!(
            email = %mask_email(&normalized),
            event = "password_reset_completed",
            "Password updated after reset"
        );
        Ok(())
    }

    /// Normalize and format-check an address
    fn validated(&self, email: &str) -> DomainResult<String> {
        let normalized = normalize_email(email);
        if !is_valid_email(&normalized) {
            return Err(DomainError::Validation {
                message: format!("Invalid email format: {}", mask_email(email)),
            });
        }
        Ok(normalized)
    }

    /// Fail with NotFound unless the directory has the address
    async fn require_account(&self, normalized: &str) -> DomainResult<()> {
        match self.directory.find_by_email(normalized).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound {
                resource: format!("account {}", mask_email(normalized)),
            }),
        }
    }
}
