//! Error types for the vault and journal.
//!
//! Failure is a first-class value here: domain outcomes (conflict, mismatch)
//! and storage faults are distinct variants, so a caller can always tell
//! "credentials are wrong" apart from "the store is down". Domain variants
//! carry the identifier for audit logging but never the hash or plaintext.

use idvault_core::{CoreError, Identifier};
use idvault_store::StoreError;
use thiserror::Error;

/// Errors that can occur during vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Caller error: null/empty identifier or malformed request shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Registration attempted for an identifier that already has a credential.
    #[error("identifier [{identifier}] was already taken")]
    IdentifierConflict {
        /// The identifier that collided.
        identifier: Identifier,
    },

    /// Verification failed: unknown identifier or wrong secret, deliberately
    /// conflated so callers cannot enumerate registered identifiers.
    #[error("credentials did not match for [{identifier}]")]
    IdentifierMismatch {
        /// The identifier that failed verification.
        identifier: Identifier,
    },

    /// The underlying store failed or timed out. Transient; safe to retry
    /// with backoff. Never folded into a mismatch.
    #[error("store unavailable: {0}")]
    Store(#[from] StoreError),

    /// Secret hashing failed. Internal; not a caller error.
    #[error("hasher failure: {0}")]
    Hasher(#[from] CoreError),
}

/// Errors that can occur during journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Caller error: invalid identifier.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The append to the audit log failed. Surfaced, never swallowed:
    /// silently dropping audit data is unacceptable.
    #[error("journal write failed: {0}")]
    Write(#[source] StoreError),

    /// The audit log read path failed or timed out.
    #[error("journal unavailable: {0}")]
    Store(#[from] StoreError),
}

/// Result type for vault operations.
pub type VaultResult<T> = std::result::Result<T, VaultError>;

/// Result type for journal operations.
pub type JournalResult<T> = std::result::Result<T, JournalError>;
