//! Unit tests for the account service

mod mocks;
