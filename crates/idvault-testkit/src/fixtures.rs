//! Test fixtures and helpers.
//!
//! Common setup code for vault and journal tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use idvault_core::{
    Argon2SecretHasher, Identifier, IssuedToken, JournalEntry, TokenGenerator, DIGEST_LEN,
};
use idvault_store::{AuditLog, MemoryAuditLog};

/// An Argon2id hasher with the cheapest valid parameters.
///
/// Semantics match the production hasher; only the work factor differs.
pub fn fast_hasher() -> Argon2SecretHasher {
    let params = argon2::Params::new(8, 1, 1, Some(DIGEST_LEN)).expect("valid test params");
    Argon2SecretHasher::with_params(params)
}

/// Seed a memory audit log with success entries at the given timestamps.
pub async fn seed_success_log(log: &MemoryAuditLog, identifier: &str, timestamps: &[i64]) {
    let identifier = Identifier::new(identifier).expect("valid test identifier");
    for &utc in timestamps {
        log.append(&JournalEntry::success(identifier.clone(), utc))
            .await
            .expect("memory append");
    }
}

/// A [`TokenGenerator`] that replays a scripted sequence of tokens.
///
/// Lets tests control the issued secret, e.g. in property tests that need
/// to compare a registered token against an arbitrary wrong one.
pub struct QueuedTokenGenerator {
    queue: Mutex<VecDeque<String>>,
}

impl QueuedTokenGenerator {
    /// Create a generator that will issue the given tokens in order.
    pub fn new(tokens: impl IntoIterator<Item = String>) -> Self {
        Self {
            queue: Mutex::new(tokens.into_iter().collect()),
        }
    }
}

impl TokenGenerator for QueuedTokenGenerator {
    fn generate(&self) -> IssuedToken {
        let next = self
            .queue
            .lock()
            .unwrap()
            .pop_front()
            .expect("QueuedTokenGenerator ran out of tokens");
        IssuedToken::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idvault_core::SecretHasher;

    #[test]
    fn test_fast_hasher_roundtrip() {
        let hasher = fast_hasher();
        let hash = hasher.hash("pw").unwrap();
        assert!(hasher.verify("pw", &hash));
        assert!(!hasher.verify("other", &hash));
    }

    #[test]
    fn test_queued_generator_replays_in_order() {
        let gen = QueuedTokenGenerator::new(["one".to_string(), "two".to_string()]);
        assert_eq!(gen.generate().expose(), "one");
        assert_eq!(gen.generate().expose(), "two");
    }
}
