//! Domain entities representing core business objects.

pub mod account;
pub mod verification_token;

// Re-export commonly used types
pub use account::Account;
pub use verification_token::{
    TokenPurpose, TokenStatus, VerificationToken, CODE_EXPIRATION_MINUTES, CODE_LENGTH,
    MAX_CODE_ATTEMPTS, MAX_RESET_ATTEMPTS, RESET_EXPIRATION_MINUTES, RESET_TOKEN_LENGTH,
};
