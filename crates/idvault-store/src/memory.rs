//! In-memory implementations of the storage ports.
//!
//! These are the reference implementations, primarily for tests. They have
//! the same semantics as SQLite but keep everything in memory with no
//! persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use idvault_core::{CredentialRecord, Identifier, JournalEntry};

use crate::error::Result;
use crate::traits::{AuditLog, CredentialStore};

/// In-memory credential store.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock;
/// `put_if_absent` is atomic under the write lock.
#[derive(Default)]
pub struct MemoryCredentialStore {
    records: RwLock<HashMap<Identifier, CredentialRecord>>,
}

impl MemoryCredentialStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn exists(&self, identifier: &Identifier) -> Result<bool> {
        let records = self.records.read().unwrap();
        Ok(records.contains_key(identifier))
    }

    async fn get(&self, identifier: &Identifier) -> Result<Option<CredentialRecord>> {
        let records = self.records.read().unwrap();
        Ok(records.get(identifier).cloned())
    }

    async fn put_if_absent(&self, record: &CredentialRecord) -> Result<bool> {
        let mut records = self.records.write().unwrap();
        if records.contains_key(&record.identifier) {
            return Ok(false);
        }
        records.insert(record.identifier.clone(), record.clone());
        Ok(true)
    }
}

/// In-memory audit log: a per-key append-only vector.
///
/// Append order is preserved, so `recent_desc` stays correct even when two
/// entries share a millisecond timestamp.
#[derive(Default)]
pub struct MemoryAuditLog {
    entries: RwLock<HashMap<Identifier, Vec<JournalEntry>>>,
}

impl MemoryAuditLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditLog for MemoryAuditLog {
    async fn append(&self, entry: &JournalEntry) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries
            .entry(entry.identifier.clone())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn recent_desc(&self, identifier: &Identifier, limit: usize) -> Result<Vec<JournalEntry>> {
        let entries = self.entries.read().unwrap();
        Ok(entries
            .get(identifier)
            .map(|log| log.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
