//! # Identity Vault Testkit
//!
//! Testing utilities for the identity vault.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a cheap-parameter Argon2 hasher, a scripted token
//!   generator, and helpers for building records and seeding audit history
//! - **Generators**: proptest strategies for identifiers and secrets
//!
//! ## Fixtures
//!
//! Production Argon2 parameters dominate test runtime, so tests use the
//! cheapest valid parameters:
//!
//! ```rust
//! use idvault_testkit::fast_hasher;
//! use idvault_core::SecretHasher;
//!
//! let hasher = fast_hasher();
//! let hash = hasher.hash("secret").unwrap();
//! assert!(hasher.verify("secret", &hash));
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{fast_hasher, seed_success_log, QueuedTokenGenerator};
pub use generators::{identifier_strategy, secret_strategy};
