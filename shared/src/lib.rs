//! Shared utilities and common types for FitBuddy server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Environment detection and logging configuration
//! - Utility functions (email validation, masking, etc.)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, LogFormat, LoggingConfig, VerificationConfig};
pub use utils::email;
