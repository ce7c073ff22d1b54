//! The Journal: an append-only audit trail of successful authentications.
//!
//! Recording a success is the caller's responsibility after a vault match;
//! the journal itself never touches credentials. Reads are independent of
//! the vault entirely.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use idvault_core::{now_millis, Identifier, JournalEntry};
use idvault_store::{AuditLog, StoreError};

use crate::error::{JournalError, JournalResult};

/// Configuration for the Journal.
#[derive(Debug, Clone)]
pub struct JournalConfig {
    /// Deadline for each audit-log round-trip. `None` disables the bound.
    pub op_timeout: Option<Duration>,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            op_timeout: Some(Duration::from_secs(5)),
        }
    }
}

/// The journal: a stateless façade over an [`AuditLog`].
///
/// Entries are append-only; two `record_success` calls produce two entries
/// (idempotency is neither guaranteed nor required).
pub struct Journal<A: AuditLog> {
    log: Arc<A>,
    config: JournalConfig,
}

impl<A: AuditLog> Journal<A> {
    /// Create a journal over the given audit log.
    pub fn new(log: A, config: JournalConfig) -> Self {
        Self {
            log: Arc::new(log),
            config,
        }
    }

    /// Create a journal with the default configuration.
    pub fn with_defaults(log: A) -> Self {
        Self::new(log, JournalConfig::default())
    }

    /// Get the audit log reference.
    pub fn log(&self) -> &A {
        &self.log
    }

    /// Record one successful authentication, stamped with the current time.
    ///
    /// Append failures surface as [`JournalError::Write`]; they are never
    /// swallowed.
    pub async fn record_success(&self, identifier: &str) -> JournalResult<JournalEntry> {
        let identifier = parse_identifier(identifier)?;
        let entry = JournalEntry::success(identifier, now_millis());

        self.bounded(self.log.append(&entry))
            .await
            .map_err(JournalError::Write)?;

        tracing::info!(identifier = %entry.identifier, utc = entry.utc_millis,
            "authentication success journaled");
        Ok(entry)
    }

    /// Get up to `limit` success entries for the identifier, newest first.
    ///
    /// `limit == 0` and an empty history both yield an empty vec.
    pub async fn recent_successes(
        &self,
        identifier: &str,
        limit: usize,
    ) -> JournalResult<Vec<JournalEntry>> {
        let identifier = parse_identifier(identifier)?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        Ok(self.bounded(self.log.recent_desc(&identifier, limit)).await?)
    }

    /// Run a log operation under the configured deadline.
    async fn bounded<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match self.config.op_timeout {
            Some(limit) => match tokio::time::timeout(limit, op).await {
                Ok(result) => result,
                Err(_) => Err(StoreError::Timeout),
            },
            None => op.await,
        }
    }
}

fn parse_identifier(identifier: &str) -> JournalResult<Identifier> {
    Identifier::new(identifier).map_err(|e| JournalError::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use idvault_core::AuthState;
    use idvault_store::MemoryAuditLog;

    fn test_journal() -> Journal<MemoryAuditLog> {
        Journal::with_defaults(MemoryAuditLog::new())
    }

    #[tokio::test]
    async fn test_record_then_query() {
        let journal = test_journal();
        let entry = journal.record_success("alice").await.unwrap();
        assert_eq!(entry.state, AuthState::Successful);

        let recent = journal.recent_successes("alice", 10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0], entry);
    }

    #[tokio::test]
    async fn test_two_records_produce_two_entries() {
        let journal = test_journal();
        journal.record_success("alice").await.unwrap();
        journal.record_success("alice").await.unwrap();

        let recent = journal.recent_successes("alice", 10).await.unwrap();
        assert_eq!(recent.len(), 2);
        // Newest first: timestamps never decrease down the vec.
        assert!(recent[0].utc_millis >= recent[1].utc_millis);
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_for_explicit_times() {
        let log = MemoryAuditLog::new();
        idvault_testkit::seed_success_log(&log, "alice", &[1_000, 2_000, 3_000]).await;
        let journal = Journal::with_defaults(log);

        let recent = journal.recent_successes("alice", 2).await.unwrap();
        let times: Vec<i64> = recent.iter().map(|e| e.utc_millis).collect();
        assert_eq!(times, vec![3_000, 2_000]);
    }

    #[tokio::test]
    async fn test_limit_zero_is_empty() {
        let journal = test_journal();
        journal.record_success("alice").await.unwrap();
        assert!(journal.recent_successes("alice", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_history_is_empty_not_error() {
        let journal = test_journal();
        assert!(journal.recent_successes("ghost", 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_identifier() {
        let journal = test_journal();
        assert!(matches!(
            journal.record_success(" ").await.unwrap_err(),
            JournalError::InvalidInput(_)
        ));
        assert!(matches!(
            journal.recent_successes("", 3).await.unwrap_err(),
            JournalError::InvalidInput(_)
        ));
    }

    /// Audit log stub whose appends always fail.
    struct BrokenLog;

    #[async_trait]
    impl AuditLog for BrokenLog {
        async fn append(&self, _entry: &JournalEntry) -> idvault_store::Result<()> {
            Err(StoreError::InvalidData("append refused".to_string()))
        }

        async fn recent_desc(
            &self,
            _identifier: &Identifier,
            _limit: usize,
        ) -> idvault_store::Result<Vec<JournalEntry>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_append_failure_surfaces_as_write_error() {
        let journal = Journal::with_defaults(BrokenLog);
        let err = journal.record_success("alice").await.unwrap_err();
        assert!(matches!(err, JournalError::Write(_)));
    }

    /// Audit log stub whose appends hang forever.
    struct StalledLog;

    #[async_trait]
    impl AuditLog for StalledLog {
        async fn append(&self, _entry: &JournalEntry) -> idvault_store::Result<()> {
            std::future::pending().await
        }

        async fn recent_desc(
            &self,
            _identifier: &Identifier,
            _limit: usize,
        ) -> idvault_store::Result<Vec<JournalEntry>> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_log_times_out() {
        let journal = Journal::new(
            StalledLog,
            JournalConfig {
                op_timeout: Some(Duration::from_millis(50)),
            },
        );

        let err = journal.record_success("alice").await.unwrap_err();
        assert!(matches!(err, JournalError::Write(StoreError::Timeout)));

        let err = journal.recent_successes("alice", 3).await.unwrap_err();
        assert!(matches!(err, JournalError::Store(StoreError::Timeout)));
    }
}
