//! Example demonstrating the verification flows
//!
//! Wires the verification service to the in-memory store and mock mailer,
//! then walks the email verification and password reset flows.
//!
//! Run with: cargo run --example verification_demo

use std::sync::Arc;

use fb_core::domain::entities::account::Account;
use fb_core::repositories::{AccountDirectory, MockAccountDirectory};
use fb_core::services::account::{AccountService, AccountServiceConfig};
use fb_core::services::verification::{VerificationService, VerificationServiceConfig};
use fb_infra::{InMemoryTokenStore, MockMailerService};
use fb_shared::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app_config = AppConfig::default();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&app_config.logging.level)),
        )
        .init();

    let mailer = Arc::new(MockMailerService::new());
    let store = Arc::new(InMemoryTokenStore::new());
    let verification = Arc::new(VerificationService::new(
        mailer.clone(),
        store,
        VerificationServiceConfig::from(&app_config.verification),
    ));

    let directory = Arc::new(MockAccountDirectory::new());
    directory
        .insert(Account::new("demo@fitbuddy.app".to_string()))
        .await?;
    let accounts = AccountService::new(
        directory.clone(),
        verification.clone(),
        AccountServiceConfig::default(),
    );

    // --- Email verification flow ---
    println!("-> requesting email verification for demo@fitbuddy.app");
    let outcome = accounts.request_email_verification("Demo@FitBuddy.app").await?;
    println!(
        "   code issued, expires in {} s, next resend at {}",
        outcome.expires_in_seconds, outcome.next_resend_at
    );

    let code = mailer
        .last_secret_for("demo@fitbuddy.app")
        .ok_or("mailer recorded no code")?;

    println!("-> submitting a wrong code first");
    match accounts.confirm_email("demo@fitbuddy.app", "000000").await {
        Err(e) => println!("   rejected as expected: {}", e),
        Ok(_) => println!("   unexpectedly accepted"),
    }

    println!("-> submitting the real code");
    accounts.confirm_email("demo@fitbuddy.app", &code).await?;
    let account = directory
        .find_by_email("demo@fitbuddy.app")
        .await?
        .ok_or("account missing")?;
    println!("   email_verified = {}", account.email_verified);

    // --- Password reset flow ---
    println!("-> requesting password reset");
    accounts.request_password_reset("demo@fitbuddy.app").await?;
    let token = mailer
        .last_secret_for("demo@fitbuddy.app")
        .ok_or("mailer recorded no token")?;

    println!("-> a second reset request inside the cooldown window");
    match accounts.request_password_reset("demo@fitbuddy.app").await {
        Err(e) => println!("   throttled as expected: {}", e),
        Ok(_) => println!("   unexpectedly allowed"),
    }

    println!("-> verifying reset token");
    accounts.verify_password_reset("demo@fitbuddy.app", &token).await?;

    println!("-> completing reset with the new password");
    accounts
        .complete_password_reset("demo@fitbuddy.app", "a-much-better-password")
        .await?;
    println!("   password updated");

    Ok(())
}
