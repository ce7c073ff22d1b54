//! # Identity Vault Core
//!
//! Pure primitives for the identity vault: identifiers, credential records,
//! journal entries, secret hashing, and token generation.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over credential data.
//!
//! ## Key Types
//!
//! - [`Identifier`] - The validated name of a principal
//! - [`CredentialRecord`] - An identifier paired with its one-way secret hash
//! - [`IssuedToken`] - The plaintext secret, returned exactly once at registration
//! - [`JournalEntry`] - One successful-authentication event
//!
//! ## Hashing
//!
//! Secrets are stored only as salted Argon2id digests. See [`crypto`].

pub mod crypto;
pub mod error;
pub mod time;
pub mod types;

pub use crypto::{
    Argon2SecretHasher, RandomTokenGenerator, SecretHash, SecretHasher, TokenGenerator,
    DIGEST_LEN, SALT_LEN, TOKEN_LEN,
};
pub use error::CoreError;
pub use time::now_millis;
pub use types::{AuthResult, AuthState, CredentialRecord, Identifier, IssuedToken, JournalEntry};
