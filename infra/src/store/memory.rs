//! In-memory token store
//!
//! Process-local storage for verification records and send-throttle
//! stamps. Nothing survives a restart; that matches the component's
//! design (no durable storage). Both maps sit behind a mutex so the
//! one-live-record-per-key and atomic-attempt-increment invariants hold
//! on a multithreaded runtime.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use fb_core::domain::entities::verification_token::VerificationToken;
use fb_core::services::verification::TokenStore;

/// In-memory implementation of [`TokenStore`]
///
/// Records and throttle stamps are separate maps over the same key space:
/// a throttle stamp can outlive its record.
pub struct InMemoryTokenStore {
    records: Mutex<HashMap<String, VerificationToken>>,
    throttle: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            throttle: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live records (for diagnostics)
    pub fn record_count(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }
}

impl Default for InMemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> String {
    "token store mutex poisoned".to_string()
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self, key: &str) -> Result<Option<VerificationToken>, String> {
        let records = self.records.lock().map_err(|_| poisoned())?;
        Ok(records.get(key).cloned())
    }

    async fn save(&self, key: &str, token: VerificationToken) -> Result<(), String> {
        let mut records = self.records.lock().map_err(|_| poisoned())?;
        records.insert(key.to_string(), token);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), String> {
        let mut records = self.records.lock().map_err(|_| poisoned())?;
        records.remove(key);
        Ok(())
    }

    async fn last_sent_at(&self, key: &str) -> Result<Option<DateTime<Utc>>, String> {
        let throttle = self.throttle.lock().map_err(|_| poisoned())?;
        Ok(throttle.get(key).copied())
    }

    async fn touch_sent(&self, key: &str, sent_at: DateTime<Utc>) -> Result<(), String> {
        let mut throttle = self.throttle.lock().map_err(|_| poisoned())?;
        throttle.insert(key.to_string(), sent_at);
        Ok(())
    }

    async fn clear_throttle(&self, key: &str) -> Result<(), String> {
        let mut throttle = self.throttle.lock().map_err(|_| poisoned())?;
        throttle.remove(key);
        Ok(())
    }
}
