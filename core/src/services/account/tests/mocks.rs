//! Mock collaborators for account service tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::entities::verification_token::VerificationToken;
use crate::services::verification::{MailerService, TokenStore};

// Mock mailer recording the last secret per recipient
pub struct MockMailer {
    pub sent_secrets: Arc<Mutex<HashMap<String, String>>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent_secrets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn last_secret_for(&self, email: &str) -> Option<String> {
        self.sent_secrets.lock().unwrap().get(email).cloned()
    }

    fn record(&self, email: &str, secret: &str) -> Result<String, String> {
        self.sent_secrets
            .lock()
            .unwrap()
            .insert(email.to_string(), secret.to_string());
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}

#[async_trait]
impl MailerService for MockMailer {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String> {
        self.record(email, code)
    }

    async fn send_password_reset(&self, email: &str, token: &str) -> Result<String, String> {
        self.record(email, token)
    }
}

// Mock token store backed by plain maps
pub struct MockTokenStore {
    pub records: Arc<Mutex<HashMap<String, VerificationToken>>>,
    pub throttle: Arc<Mutex<HashMap<String, DateTime<Utc>>>>,
}

impl MockTokenStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            throttle: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl TokenStore for MockTokenStore {
    async fn load(&self, key: &str) -> Result<Option<VerificationToken>, String> {
        Ok(self.records.lock().unwrap().get(key).cloned())
    }

    async fn save(&self, key: &str, token: VerificationToken) -> Result<(), String> {
        self.records.lock().unwrap().insert(key.to_string(), token);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), String> {
        self.records.lock().unwrap().remove(key);
        Ok(())
    }

    async fn last_sent_at(&self, key: &str) -> Result<Option<DateTime<Utc>>, String> {
        Ok(self.throttle.lock().unwrap().get(key).copied())
    }

    async fn touch_sent(&self, key: &str, sent_at: DateTime<Utc>) -> Result<(), String> {
        self.throttle.lock().unwrap().insert(key.to_string(), sent_at);
        Ok(())
    }

    async fn clear_throttle(&self, key: &str) -> Result<(), String> {
        self.throttle.lock().unwrap().remove(key);
        Ok(())
    }
}
