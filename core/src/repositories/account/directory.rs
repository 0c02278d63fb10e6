//! Account directory trait defining the interface for account persistence.
//!
//! The verification service itself never touches the directory; callers
//! (the account service) report verification outcomes into it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for account persistence operations
///
/// Implementations handle the actual storage while keeping the boundary
/// between domain and infrastructure layers. All email parameters are
/// expected in normalized (trimmed, lowercased) form.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Find an account by its normalized email address
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with that address
    /// * `Err(DomainError)` - Storage error
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Insert a new account
    ///
    /// Fails with a validation error when an account already exists for
    /// the same address.
    async fn insert(&self, account: Account) -> Result<Account, DomainError>;

    /// Flip the email-verified flag for an account
    async fn mark_email_verified(
        &self,
        email: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Replace the stored password hash for an account
    async fn update_password_hash(&self, email: &str, hash: String) -> Result<(), DomainError>;
}
