//! # Identity Vault
//!
//! A minimal identity vault: register a caller-supplied identifier exactly
//! once, issue an opaque secret token for it, and later verify presented
//! credentials against the stored hash. A companion append-only journal
//! records every successful verification for audit.
//!
//! ## Key Concepts
//!
//! - **Write-once secret**: the plaintext token is returned exactly once at
//!   registration and never persisted. Only its salted Argon2id hash is kept.
//! - **Uniqueness**: at most one credential per identifier, enforced by the
//!   store's atomic conditional insert even under concurrent registration.
//! - **Conflated mismatch**: an unknown identifier and a wrong secret fail
//!   identically, so the error shape cannot be used to enumerate identifiers.
//! - **Append-only journal**: successes are journaled by the caller after a
//!   match; entries are queried newest-first and never mutated.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use idvault::{Journal, Vault};
//! use idvault::store::SqliteStore;
//!
//! async fn example() {
//!     let vault = Vault::with_defaults(SqliteStore::open("vault.db").unwrap());
//!     let journal = Journal::with_defaults(SqliteStore::open("vault.db").unwrap());
//!
//!     // Register once; the plaintext token is never retrievable again.
//!     let token = vault.register("alice").await.unwrap();
//!
//!     // Later: verify, then journal the success.
//!     let auth = vault.match_secret("alice", token.expose()).await.unwrap();
//!     assert!(auth.matched);
//!     journal.record_success("alice").await.unwrap();
//!
//!     let recent = journal.recent_successes("alice", 10).await.unwrap();
//!     assert_eq!(recent.len(), 1);
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - [`core`] - primitives (Identifier, IssuedToken, hashing, tokens)
//! - [`store`] - storage ports, in-memory reference and SQLite backends

pub use idvault_core as core;
pub use idvault_store as store;

pub mod error;
pub mod journal;
pub mod vault;

pub use error::{JournalError, JournalResult, VaultError, VaultResult};
pub use journal::{Journal, JournalConfig};
pub use vault::{Vault, VaultConfig};
