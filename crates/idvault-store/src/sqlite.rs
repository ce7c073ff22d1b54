//! SQLite implementation of the storage ports.
//!
//! This is the durable backend: one database serves both the credential
//! store and the audit log. It uses rusqlite with bundled SQLite, wrapped
//! in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use idvault_core::{now_millis, AuthState, CredentialRecord, Identifier, JournalEntry, SecretHash};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{AuditLog, CredentialStore};

/// SQLite-based store implementing both [`CredentialStore`] and [`AuditLog`].
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking to
/// avoid blocking the async runtime. `put_if_absent` relies on the primary
/// key constraint, so uniqueness holds across concurrent callers and across
/// restarts.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        tracing::debug!(path = %path.display(), "opened vault database");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

/// Map a poisoned-mutex error onto the store error type.
fn poisoned<T>(e: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
        Some(format!("mutex poisoned: {}", e)),
    ))
}

/// Map a failed spawn_blocking join onto the store error type.
fn join_failed(e: tokio::task::JoinError) -> StoreError {
    StoreError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
        Some(format!("spawn_blocking failed: {}", e)),
    ))
}

#[async_trait]
impl CredentialStore for SqliteStore {
    async fn exists(&self, identifier: &Identifier) -> Result<bool> {
        let key = identifier.as_str().to_string();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(poisoned)?;

            let found: Option<String> = conn
                .query_row(
                    "SELECT key FROM credentials WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;

            Ok(found.is_some())
        })
        .await
        .map_err(join_failed)?
    }

    async fn get(&self, identifier: &Identifier) -> Result<Option<CredentialRecord>> {
        let identifier = identifier.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(poisoned)?;

            let hash_bytes: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT secret_hash FROM credentials WHERE key = ?1",
                    params![identifier.as_str()],
                    |row| row.get(0),
                )
                .optional()?;

            match hash_bytes {
                Some(bytes) => {
                    let secret_hash = SecretHash::from_bytes(bytes)
                        .map_err(|e| StoreError::InvalidData(e.to_string()))?;
                    Ok(Some(CredentialRecord::new(identifier, secret_hash)))
                }
                None => Ok(None),
            }
        })
        .await
        .map_err(join_failed)?
    }

    async fn put_if_absent(&self, record: &CredentialRecord) -> Result<bool> {
        let key = record.identifier.as_str().to_string();
        let hash = record.secret_hash.as_bytes().to_vec();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(poisoned)?;

            // INSERT OR IGNORE against the primary key is the atomic
            // check-and-write: zero rows changed means the key was taken.
            let changed = conn.execute(
                "INSERT OR IGNORE INTO credentials (key, secret_hash, created_at)
                 VALUES (?1, ?2, ?3)",
                params![key, hash, now_millis()],
            )?;

            Ok(changed == 1)
        })
        .await
        .map_err(join_failed)?
    }
}

#[async_trait]
impl AuditLog for SqliteStore {
    async fn append(&self, entry: &JournalEntry) -> Result<()> {
        let key = entry.identifier.as_str().to_string();
        let state = entry.state.as_u8();
        let utc = entry.utc_millis;
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(poisoned)?;

            conn.execute(
                "INSERT INTO success_log (key, state, utc) VALUES (?1, ?2, ?3)",
                params![key, state, utc],
            )?;

            Ok(())
        })
        .await
        .map_err(join_failed)?
    }

    async fn recent_desc(&self, identifier: &Identifier, limit: usize) -> Result<Vec<JournalEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let identifier = identifier.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(poisoned)?;

            let mut stmt = conn.prepare(
                "SELECT state, utc FROM success_log
                 WHERE key = ?1
                 ORDER BY utc DESC, seq DESC
                 LIMIT ?2",
            )?;

            let rows = stmt.query_map(params![identifier.as_str(), limit as i64], |row| {
                let state: u8 = row.get(0)?;
                let utc: i64 = row.get(1)?;
                Ok((state, utc))
            })?;

            let mut entries = Vec::new();
            for row in rows {
                let (state, utc) = row?;
                let state = AuthState::from_u8(state).ok_or_else(|| {
                    StoreError::InvalidData(format!("unknown auth state code: {}", state))
                })?;
                entries.push(JournalEntry {
                    identifier: identifier.clone(),
                    state,
                    utc_millis: utc,
                });
            }

            Ok(entries)
        })
        .await
        .map_err(join_failed)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    fn record(s: &str, fill: u8) -> CredentialRecord {
        let hash = SecretHash::from_bytes(vec![fill; 48]).unwrap();
        CredentialRecord::new(ident(s), hash)
    }

    #[tokio::test]
    async fn test_credential_roundtrip() {
        let store = SqliteStore::open_memory().unwrap();
        let rec = record("alice", 0x2a);

        assert!(store.put_if_absent(&rec).await.unwrap());
        assert!(store.exists(&ident("alice")).await.unwrap());

        let loaded = store.get(&ident("alice")).await.unwrap().unwrap();
        assert_eq!(loaded.secret_hash, rec.secret_hash);
        assert!(store.get(&ident("bob")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_if_absent_keeps_first_record() {
        let store = SqliteStore::open_memory().unwrap();
        let first = record("alice", 0x2a);
        let second = record("alice", 0x7f);

        assert!(store.put_if_absent(&first).await.unwrap());
        assert!(!store.put_if_absent(&second).await.unwrap());

        let stored = store.get(&ident("alice")).await.unwrap().unwrap();
        assert_eq!(stored.secret_hash, first.secret_hash);
    }

    #[tokio::test]
    async fn test_journal_order_and_limit() {
        let store = SqliteStore::open_memory().unwrap();
        for utc in [100, 200, 300] {
            store
                .append(&JournalEntry::success(ident("alice"), utc))
                .await
                .unwrap();
        }

        let recent = store.recent_desc(&ident("alice"), 2).await.unwrap();
        let times: Vec<i64> = recent.iter().map(|e| e.utc_millis).collect();
        assert_eq!(times, vec![300, 200]);

        assert!(store.recent_desc(&ident("alice"), 0).await.unwrap().is_empty());
        assert!(store.recent_desc(&ident("bob"), 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_journal_same_millisecond_uses_insertion_order() {
        let store = SqliteStore::open_memory().unwrap();
        store
            .append(&JournalEntry::success(ident("alice"), 500))
            .await
            .unwrap();
        store
            .append(&JournalEntry::success(ident("alice"), 500))
            .await
            .unwrap();

        let recent = store.recent_desc(&ident("alice"), 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert!(recent.iter().all(|e| e.utc_millis == 500));
    }

    #[tokio::test]
    async fn test_uniqueness_and_order_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            assert!(store.put_if_absent(&record("alice", 0x2a)).await.unwrap());
            for utc in [100, 200] {
                store
                    .append(&JournalEntry::success(ident("alice"), utc))
                    .await
                    .unwrap();
            }
        }

        let store = SqliteStore::open(&path).unwrap();
        assert!(!store.put_if_absent(&record("alice", 0x7f)).await.unwrap());

        let recent = store.recent_desc(&ident("alice"), 10).await.unwrap();
        let times: Vec<i64> = recent.iter().map(|e| e.utc_millis).collect();
        assert_eq!(times, vec![200, 100]);
    }
}
