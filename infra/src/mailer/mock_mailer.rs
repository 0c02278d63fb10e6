//! Mock Mailer Implementation
//!
//! A mock implementation of the mailer for development and testing.
//! Messages are printed to the console instead of being delivered.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use fb_core::domain::entities::verification_token::{
    CODE_EXPIRATION_MINUTES, RESET_EXPIRATION_MINUTES,
};
use fb_core::services::verification::MailerService;
use fb_shared::utils::email::mask_email;

/// Mock mailer for development and testing
///
/// This implementation:
/// - Logs outbound messages to the console
/// - Generates mock message IDs
/// - Records the last secret sent per recipient (for tests)
/// - Tracks message count
/// - Simulates network latency
#[derive(Clone)]
pub struct MockMailerService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Last secret dispatched per recipient
    sent_secrets: Arc<Mutex<HashMap<String, String>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockMailerService {
    /// Create a new mock mailer
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            sent_secrets: Arc::new(Mutex::new(HashMap::new())),
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Create a mock mailer with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            sent_secrets: Arc::new(Mutex::new(HashMap::new())),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Last secret dispatched to a recipient, if any
    pub fn last_secret_for(&self, email: &str) -> Option<String> {
        self.sent_secrets
            .lock()
            .ok()
            .and_then(|sent| sent.get(email).cloned())
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    async fn deliver(
        &self,
        email: &str,
        secret: &str,
        subject: &str,
        body: String,
    ) -> Result<String, String> {
        if self.simulate_failure {
            warn!(
                email = %mask_email(email),
                "Mock mailer simulating delivery failure"
            );
            return Err("Simulated mail delivery failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if let Ok(mut sent) = self.sent_secrets.lock() {
            sent.insert(email.to_string(), secret.to_string());
        }

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK MAILER - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", email);
            println!("Subject: {}", subject);
            println!("Message ID: {}", message_id);
            println!("Body: {}", body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "mailer",
            provider = "mock",
            email = %mask_email(email),
            message_id = %message_id,
            "Mail dispatched (mock)"
        );

        // Simulate network delay
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(message_id)
    }
}

impl Default for MockMailerService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailerService for MockMailerService {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String> {
        let body = format!(
            "Your FitBuddy verification code is {}. It expires in {} minutes.",
            code, CODE_EXPIRATION_MINUTES
        );
        self.deliver(email, code, "Verify your FitBuddy email", body)
            .await
    }

    async fn send_password_reset(&self, email: &str, token: &str) -> Result<String, String> {
        let body = format!(
            "Your FitBuddy password reset code is {}. It expires in {} minutes. \
             If you did not request this, you can ignore this message.",
            token, RESET_EXPIRATION_MINUTES
        );
        self.deliver(email, token, "Reset your FitBuddy password", body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_verification_code() {
        let mailer = MockMailerService::with_options(false, false);
        let result = mailer
            .send_verification_code("user@example.com", "123456")
            .await;

        assert!(result.is_ok());
        assert!(result.unwrap().starts_with("mock_"));
        assert_eq!(mailer.message_count(), 1);
        assert_eq!(
            mailer.last_secret_for("user@example.com"),
            Some("123456".to_string())
        );
    }

    #[tokio::test]
    async fn test_send_password_reset() {
        let mailer = MockMailerService::with_options(false, false);
        let result = mailer
            .send_password_reset("user@example.com", "123456654321")
            .await;

        assert!(result.is_ok());
        assert_eq!(
            mailer.last_secret_for("user@example.com"),
            Some("123456654321".to_string())
        );
    }

    #[tokio::test]
    async fn test_simulate_failure() {
        let mailer = MockMailerService::with_options(false, true);
        let result = mailer
            .send_verification_code("user@example.com", "123456")
            .await;

        assert!(result.is_err());
        assert_eq!(mailer.message_count(), 0);
    }

    #[tokio::test]
    async fn test_message_counter() {
        let mailer = MockMailerService::with_options(false, false);

        for i in 1..=3u64 {
            let _ = mailer
                .send_verification_code("user@example.com", "123456")
                .await;
            assert_eq!(mailer.message_count(), i);
        }

        mailer.reset_counter();
        assert_eq!(mailer.message_count(), 0);
    }
}
