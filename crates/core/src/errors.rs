//! Core error types for the pledge campaign.
//!
//! This module defines storage-agnostic error types. Transport-specific errors
//! (HTTP, JSON decoding, etc.) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the pledge application.
///
/// The taxonomy mirrors how callers react:
/// - `Validation` is raised before any store call and shown to the user as-is.
/// - `Submission` is an insert failure. It must never be retried automatically
///   because a pledge insert is not idempotent.
/// - `Fetch` is a read failure. Live feeds log it and keep their last snapshot.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Pledge submission failed: {0}")]
    Submission(String),

    #[error("Failed to fetch pledge data: {0}")]
    Fetch(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for pledge form input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select at least one commitment")]
    NoCommitments,

    #[error("Commitment '{0}' was selected more than once")]
    DuplicateCommitment(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Mobile number must be 10 digits, got '{0}'")]
    InvalidMobile(String),

    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("Limit must be a positive integer, got {0}")]
    InvalidLimit(usize),
}
