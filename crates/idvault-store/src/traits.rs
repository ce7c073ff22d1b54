//! Storage ports: the abstract interfaces the vault and journal depend on.
//!
//! These traits keep the vault storage-agnostic. Implementations include
//! SQLite (durable) and in-memory (reference, for tests).

use async_trait::async_trait;
use idvault_core::{CredentialRecord, Identifier, JournalEntry};

use crate::error::Result;

/// Keyed credential persistence.
///
/// All methods are async to support both the in-process reference
/// implementation and network- or disk-backed stores.
///
/// # Design Notes
///
/// - **`put_if_absent` is the atomicity anchor**: under concurrent access it
///   must admit at most one write per key. A single global lock, a per-key
///   lock, or a conditional insert in a durable store all satisfy this.
/// - Records are write-once: no update operation exists on this port.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Check whether a record exists for the identifier.
    async fn exists(&self, identifier: &Identifier) -> Result<bool>;

    /// Fetch the record for the identifier, if any.
    async fn get(&self, identifier: &Identifier) -> Result<Option<CredentialRecord>>;

    /// Insert the record unless its key is already present.
    ///
    /// Returns `true` if the record was inserted, `false` (with no mutation)
    /// if a record for the identifier already exists.
    async fn put_if_absent(&self, record: &CredentialRecord) -> Result<bool>;
}

/// Append-only audit log, keyed by identifier.
///
/// Entries are never mutated or removed through this port.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Append an entry to the log.
    async fn append(&self, entry: &JournalEntry) -> Result<()>;

    /// Get up to `limit` entries for the identifier, newest first.
    ///
    /// `limit == 0` yields an empty vec. Entries for other identifiers are
    /// never returned.
    async fn recent_desc(&self, identifier: &Identifier, limit: usize) -> Result<Vec<JournalEntry>>;
}
