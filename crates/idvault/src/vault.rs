//! The Vault: identifier registration and credential verification.
//!
//! The vault owns identifier-to-secret-hash records. It registers an
//! identifier exactly once, issuing an opaque token whose plaintext is
//! returned to the caller and never stored, and later verifies presented
//! credentials against the stored hash.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use idvault_core::{
    Argon2SecretHasher, AuthResult, CredentialRecord, Identifier, IssuedToken,
    RandomTokenGenerator, SecretHasher, TokenGenerator,
};
use idvault_store::{CredentialStore, StoreError};

use crate::error::{VaultError, VaultResult};

/// Configuration for the Vault.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Deadline for each store round-trip. `None` disables the bound;
    /// exceeding it fails with a timeout error, never a mismatch.
    pub op_timeout: Option<Duration>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            op_timeout: Some(Duration::from_secs(5)),
        }
    }
}

/// The vault: a stateless façade over a [`CredentialStore`].
///
/// Holds no mutable state of its own, so one instance is safely shared
/// across any number of concurrent callers. Registration uniqueness is
/// delegated to the store's atomic `put_if_absent`.
pub struct Vault<S: CredentialStore> {
    store: Arc<S>,
    hasher: Arc<dyn SecretHasher>,
    tokens: Arc<dyn TokenGenerator>,
    config: VaultConfig,
}

impl<S: CredentialStore> Vault<S> {
    /// Create a vault over the given store and ports.
    pub fn new(
        store: S,
        hasher: Arc<dyn SecretHasher>,
        tokens: Arc<dyn TokenGenerator>,
        config: VaultConfig,
    ) -> Self {
        Self {
            store: Arc::new(store),
            hasher,
            tokens,
            config,
        }
    }

    /// Create a vault with the default Argon2id hasher and CSPRNG tokens.
    pub fn with_defaults(store: S) -> Self {
        Self::new(
            store,
            Arc::new(Argon2SecretHasher::new()),
            Arc::new(RandomTokenGenerator::new()),
            VaultConfig::default(),
        )
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register an identifier and issue its secret token.
    ///
    /// The plaintext token is returned exactly once; only its salted hash is
    /// persisted. If a credential already exists for the identifier the call
    /// fails with [`VaultError::IdentifierConflict`] and nothing is written.
    /// A concurrent registration race is settled by the store: at most one
    /// caller wins.
    pub async fn register(&self, identifier: &str) -> VaultResult<IssuedToken> {
        let identifier = parse_identifier(identifier)?;
        tracing::debug!(%identifier, "registration attempt");

        // Fast path: skip the hashing work when the key is visibly taken.
        // The authoritative check is the conditional write below.
        if self.bounded(self.store.exists(&identifier)).await? {
            tracing::debug!(%identifier, "identifier already taken");
            return Err(VaultError::IdentifierConflict { identifier });
        }

        let token = self.tokens.generate();
        let secret_hash = self.hasher.hash(token.expose())?;
        let record = CredentialRecord::new(identifier.clone(), secret_hash);

        if !self.bounded(self.store.put_if_absent(&record)).await? {
            tracing::debug!(%identifier, "lost registration race");
            return Err(VaultError::IdentifierConflict { identifier });
        }

        tracing::info!(%identifier, "registered new credential");
        Ok(token)
    }

    /// Verify a presented secret against the stored credential.
    ///
    /// An unknown identifier and a wrong secret produce the same
    /// [`VaultError::IdentifierMismatch`], so the error shape leaks nothing
    /// about which identifiers are registered. Store failures propagate as
    /// [`VaultError::Store`] and are never folded into a mismatch.
    pub async fn match_secret(
        &self,
        identifier: &str,
        presented_secret: &str,
    ) -> VaultResult<AuthResult> {
        let identifier = parse_identifier(identifier)?;
        tracing::debug!(%identifier, "credential lookup");

        let record = self.bounded(self.store.get(&identifier)).await?;

        match record {
            Some(record) if self.hasher.verify(presented_secret, &record.secret_hash) => {
                tracing::debug!(%identifier, "credentials matched");
                Ok(AuthResult {
                    identifier,
                    matched: true,
                })
            }
            _ => {
                tracing::debug!(%identifier, "credentials did not match");
                Err(VaultError::IdentifierMismatch { identifier })
            }
        }
    }

    /// Run a store operation under the configured deadline.
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

fn parse_identifier(identifier: &str) -> VaultResult<Identifier> {
    Identifier::new(identifier).map_err(|e| VaultError::InvalidInput(e.to_string()))
}
