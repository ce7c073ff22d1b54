//! Error types for the identity vault core.

use thiserror::Error;

/// Core errors that can occur while working with credential primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("secret hashing failed: {0}")]
    HashingFailed(String),

    #[error("malformed secret hash: expected {expected} bytes, got {actual}")]
    MalformedHash { expected: usize, actual: usize },
}
