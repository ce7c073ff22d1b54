//! Strong type definitions for the identity vault.
//!
//! All domain values are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::SecretHash;
use crate::error::CoreError;

/// The validated name of a principal.
///
/// This is the primary key for both the vault and the journal. Equality is
/// exact string equality. Construction rejects input that trims to empty.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    /// Validate and wrap an identifier.
    ///
    /// The input is kept verbatim; validation only requires that it is
    /// non-empty after trimming whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CoreError::InvalidIdentifier(
                "identifier must be non-empty".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Get the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Identifier {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A registered credential: an identifier paired with the one-way hash of
/// its secret.
///
/// Created once at registration and never mutated. At most one record exists
/// per identifier at any time.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// The principal this record belongs to.
    pub identifier: Identifier,
    /// Salted one-way hash of the issued token. Never the plaintext.
    pub secret_hash: SecretHash,
}

impl CredentialRecord {
    /// Create a new credential record.
    pub fn new(identifier: Identifier, secret_hash: SecretHash) -> Self {
        Self {
            identifier,
            secret_hash,
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The hash is deliberately elided.
        write!(f, "CredentialRecord({})", self.identifier)
    }
}

/// The plaintext secret issued to the caller at registration time.
///
/// Returned exactly once and never persisted; the vault keeps only the hash.
/// `Debug` and `Display` are redacted so the token cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken(String);

impl IssuedToken {
    /// Wrap a plaintext token.
    pub fn new(plaintext: String) -> Self {
        Self(plaintext)
    }

    /// Expose the plaintext. Callers must not log the returned value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper, yielding the plaintext.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IssuedToken([REDACTED])")
    }
}

impl fmt::Display for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// The outcome of a credential match. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    /// The principal that was verified.
    pub identifier: Identifier,
    /// Whether the presented secret matched the stored hash.
    pub matched: bool,
}

/// The recorded state of an authentication attempt.
///
/// Only successes are journaled; the enum exists so the journal format can
/// grow without a schema break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthState {
    /// The presented credentials matched.
    Successful,
}

impl AuthState {
    /// Stable numeric code for storage.
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Successful => 1,
        }
    }

    /// Parse a stored numeric code.
    pub const fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::Successful),
            _ => None,
        }
    }
}

/// One successful-authentication event in the audit journal.
///
/// Immutable once appended. Entries for an identifier are ordered by
/// timestamp ascending at write time and queried most-recent-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// The principal that authenticated.
    pub identifier: Identifier,
    /// The recorded state (always `Successful` through the public API).
    pub state: AuthState,
    /// Event time in milliseconds since the Unix epoch (UTC).
    pub utc_millis: i64,
}

impl JournalEntry {
    /// Create a success entry at the given time.
    pub fn success(identifier: Identifier, utc_millis: i64) -> Self {
        Self {
            identifier,
            state: AuthState::Successful,
            utc_millis,
        }
    }
}
