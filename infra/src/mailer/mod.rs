//! Mail dispatch implementations

pub mod mock_mailer;

pub use mock_mailer::MockMailerService;
