//! Configuration for the account service

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,

    /// Minimum accepted password length
    pub min_password_length: usize,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            min_password_length: MIN_PASSWORD_LENGTH,
        }
    }
}
