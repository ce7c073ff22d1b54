//! # Identity Vault Store
//!
//! Storage abstraction for the identity vault. Provides trait-based ports
//! for credential persistence and the audit journal, with SQLite and
//! in-memory implementations.
//!
//! ## Overview
//!
//! The vault and journal are specified against two ports:
//!
//! - [`CredentialStore`] - keyed credential records with an atomic
//!   `put_if_absent`, the anchor for registration uniqueness
//! - [`AuditLog`] - an append-only, per-key, newest-first-queryable log
//!
//! The primary implementation is [`SqliteStore`] (one database serving both
//! ports), with [`MemoryCredentialStore`] and [`MemoryAuditLog`] for tests.
//!
//! ## Design Notes
//!
//! - **Atomic registration**: `put_if_absent` either inserts a brand-new
//!   record or changes nothing. Two concurrent registrations for one key
//!   cannot both succeed.
//! - **Append-only journal**: entries are never mutated or removed through
//!   these ports; queries return at most `limit` entries, newest first.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::{MemoryAuditLog, MemoryCredentialStore};
pub use sqlite::SqliteStore;
pub use traits::{AuditLog, CredentialStore};
