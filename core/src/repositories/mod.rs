//! Repository interfaces for entity persistence.

pub mod account;

pub use account::{AccountDirectory, MockAccountDirectory};
