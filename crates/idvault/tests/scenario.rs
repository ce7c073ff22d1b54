//! End-to-end scenario: register, match, conflict, journal, query.
//!
//! The same flow runs against the in-memory reference stores and against
//! SQLite, since both must satisfy the same port contracts.

use std::sync::Arc;

use idvault::core::RandomTokenGenerator;
use idvault::store::{AuditLog, CredentialStore, MemoryAuditLog, MemoryCredentialStore, SqliteStore};
use idvault::{Journal, Vault, VaultConfig, VaultError};
use idvault_testkit::fast_hasher;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

async fn run_scenario<S, A>(vault: Vault<S>, journal: Journal<A>)
where
    S: CredentialStore,
    A: AuditLog,
{
    // Register "alice" and get the one-time token.
    let token = vault.register("alice").await.unwrap();

    // The right secret matches.
    let auth = vault.match_secret("alice", token.expose()).await.unwrap();
    assert!(auth.matched);
    assert_eq!(auth.identifier.as_str(), "alice");

    // A wrong secret is a mismatch.
    let err = vault.match_secret("alice", "wrong").await.unwrap_err();
    assert!(matches!(err, VaultError::IdentifierMismatch { .. }));

    // A second registration conflicts.
    let err = vault.register("alice").await.unwrap_err();
    assert!(matches!(err, VaultError::IdentifierConflict { .. }));

    // ...and the original token still works afterwards.
    let auth = vault.match_secret("alice", token.expose()).await.unwrap();
    assert!(auth.matched);

    // Journal two successes; querying with limit 1 yields the later one.
    let first = journal.record_success("alice").await.unwrap();
    let second = journal.record_success("alice").await.unwrap();
    assert!(second.utc_millis >= first.utc_millis);

    let recent = journal.recent_successes("alice", 1).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].utc_millis, second.utc_millis);

    // Another principal's history stays invisible.
    assert!(journal.recent_successes("bob", 10).await.unwrap().is_empty());
}

fn test_vault<S: CredentialStore>(store: S) -> Vault<S> {
    Vault::new(
        store,
        Arc::new(fast_hasher()),
        Arc::new(RandomTokenGenerator::new()),
        VaultConfig::default(),
    )
}

#[tokio::test]
async fn scenario_with_memory_stores() {
    init_tracing();
    let vault = test_vault(MemoryCredentialStore::new());
    let journal = Journal::with_defaults(MemoryAuditLog::new());
    run_scenario(vault, journal).await;
}

#[tokio::test]
async fn scenario_with_sqlite_store() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario.db");

    // One database file serves both ports, as in a real deployment.
    let vault = test_vault(SqliteStore::open(&path).unwrap());
    let journal = Journal::with_defaults(SqliteStore::open(&path).unwrap());
    run_scenario(vault, journal).await;
}
