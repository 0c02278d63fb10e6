//! Account entity holding user identity and verification state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered FitBuddy account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Normalized email address (trimmed, lowercased)
    pub email: String,

    /// Bcrypt hash of the account password, if one has been set
    pub password_hash: Option<String>,

    /// Whether the email address has been verified
    pub email_verified: bool,

    /// Timestamp of the successful email verification
    pub email_verified_at: Option<DateTime<Utc>>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last modification
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new unverified account for a normalized email address
    pub fn new(email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash: None,
            email_verified: false,
            email_verified_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the account's email address as verified
    pub fn mark_email_verified(&mut self, verified_at: DateTime<Utc>) {
        self.email_verified = true;
        self.email_verified_at = Some(verified_at);
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, hash: String) {
        self.password_hash = Some(hash);
        self.updated_at = Utc::now();
    }
}
