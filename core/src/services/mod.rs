//! Business services containing domain logic and use cases.

pub mod account;
pub mod verification;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig};
pub use verification::{
    IssueOutcome, MailerService, TokenPolicy, TokenStore, VerificationService,
    VerificationServiceConfig,
};
