//! Mock implementations for testing the verification service

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::entities::verification_token::VerificationToken;
use crate::services::verification::traits::{MailerService, TokenStore};

// Mock mailer for testing
pub struct MockMailer {
    pub sent_secrets: Arc<Mutex<HashMap<String, String>>>,
    pub sent_count: Arc<Mutex<u32>>,
    pub should_fail: bool,
}

impl MockMailer {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_secrets: Arc::new(Mutex::new(HashMap::new())),
            sent_count: Arc::new(Mutex::new(0)),
            should_fail,
        }
    }

    pub fn last_secret_for(&self, email: &str) -> Option<String> {
        self.sent_secrets.lock().unwrap().get(email).cloned()
    }

    pub fn sent_count(&self) -> u32 {
        *self.sent_count.lock().unwrap()
    }

    fn record(&self, email: &str, secret: &str) -> Result<String, String> {
        if self.should_fail {
            return Err("mail service error".to_string());
        }
        self.sent_secrets
            .lock()
            .unwrap()
            .insert(email.to_string(), secret.to_string());
        *self.sent_count.lock().unwrap() += 1;
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

// Mock token store for testing
pub struct MockTokenStore {
    pub records: Arc<Mutex<HashMap<String, VerificationToken>>>,
    pub throttle: Arc<Mutex<HashMap<String, DateTime<Utc>>>>,
    pub should_fail: bool,
}

impl MockTokenStore {
    pub fn new(should_fail: bool) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            throttle: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn record(&self, key: &str) -> Option<VerificationToken> {
        self.records.lock().unwrap().get(key).cloned()
    }

    pub fn has_record(&self, key: &str) -> bool {
        self.records.lock().unwrap().contains_key(key)
    }

    pub fn has_throttle(&self, key: &str) -> bool {
        self.throttle.lock().unwrap().contains_key(key)
    }

    /// Backdate the throttle stamp for a key, as if the send happened earlier
    pub fn backdate_throttle(&self, key: &str, by_seconds: i64) {
        let mut throttle = self.throttle.lock().unwrap();
        if let Some(sent_at) = throttle.get_mut(key) {
            *sent_at = *sent_at - chrono::Duration::seconds(by_seconds);
        }
    }
}

#[async_trait]
impl TokenStore for MockTokenStore {
    async fn load(&self, key: &str) -> Result<Option<VerificationToken>, String> {
        if self.should_fail {
            return Err("token store error".to_string());
        }
        Ok(self.records.lock().unwrap().get(key).cloned())
    }

    async fn save(&self, key: &str, token: VerificationToken) -> Result<(), String> {
        if self.should_fail {
            return Err("token store error".to_string());
        }
        self.records.lock().unwrap().insert(key.to_string(), token);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("token store error".to_string());
        }
        self.records.lock().unwrap().remove(key);
        Ok(())
    }

    async fn last_sent_at(&self, key: &str) -> Result<Option<DateTime<Utc>>, String> {
        if self.should_fail {
            return Err("token store error".to_string());
        }
        Ok(self.throttle.lock().unwrap().get(key).copied())
    }

    async fn touch_sent(&self, key: &str, sent_at: DateTime<Utc>) -> Result<(), String> {
        if self.should_fail {
            return Err("token store error".to_string());
        }
        self.throttle.lock().unwrap().insert(key.to_string(), sent_at);
        Ok(())
    }

    async fn clear_throttle(&self, key: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("token store error".to_string());
        }
        self.throttle.lock().unwrap().remove(key);
        Ok(())
    }
}
