//! # FitBuddy Core
//!
//! Core business logic and domain layer for the FitBuddy backend.
//! This crate contains domain entities, business services, repository
//! interfaces, and error types that form the foundation of the
//! application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Account, TokenPurpose, TokenStatus, VerificationToken};
pub use errors::{DomainError, DomainResult, VerificationError};
pub use repositories::{AccountDirectory, MockAccountDirectory};
pub use services::{
    AccountService, AccountServiceConfig, IssueOutcome, MailerService, TokenPolicy, TokenStore,
    VerificationService, VerificationServiceConfig,
};
