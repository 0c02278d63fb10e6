//! Mock implementation of AccountDirectory for testing and development

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

use super::directory::AccountDirectory;

/// In-memory account directory keyed by normalized email
pub struct MockAccountDirectory {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl MockAccountDirectory {
    /// Create a new empty directory
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Whether the directory holds no accounts
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl Default for MockAccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountDirectory for MockAccountDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(email).cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&account.email) {
            return Err(DomainError::Validation {
                message: format!("Account already exists for {}", account.email),
            });
        }

        accounts.insert(account.email.clone(), account.clone());
        Ok(account)
    }

    async fn mark_email_verified(
        &self,
        email: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(email).ok_or_else(|| DomainError::NotFound {
            resource: format!("account {}", email),
        })?;
        account.mark_email_verified(verified_at);
        Ok(())
    }

    async fn update_password_hash(&self, email: &str, hash: String) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(email).ok_or_else(|| DomainError::NotFound {
            resource: format!("account {}", email),
        })?;
        account.set_password_hash(hash);
        Ok(())
    }
}
