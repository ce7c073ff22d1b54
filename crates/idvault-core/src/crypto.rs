//! Secret hashing and token generation for the identity vault.
//!
//! Secrets are stored only as salted Argon2id digests; verification
//! re-derives the digest with the stored salt and compares in constant time.

use argon2::Argon2;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use subtle::ConstantTimeEq;

use crate::error::CoreError;
use crate::types::IssuedToken;

/// Length of the random salt prefix in a [`SecretHash`].
pub const SALT_LEN: usize = 16;

/// Length of the derived digest in a [`SecretHash`].
pub const DIGEST_LEN: usize = 32;

/// Number of random bytes in a generated token (hex-encoded on issue).
pub const TOKEN_LEN: usize = 32;

/// A salted one-way hash of an issued token: `salt || digest`.
///
/// This is the only credential material the vault ever persists. It cannot
/// be inverted to the plaintext token.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretHash(Vec<u8>);

impl SecretHash {
    /// Reconstruct a hash from stored bytes, validating the layout.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, CoreError> {
        if bytes.len() != SALT_LEN + DIGEST_LEN {
            return Err(CoreError::MalformedHash {
                expected: SALT_LEN + DIGEST_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    /// Get the raw bytes for persistence.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn salt(&self) -> &[u8] {
        &self.0[..SALT_LEN]
    }

    fn digest(&self) -> &[u8] {
        &self.0[SALT_LEN..]
    }
}

impl fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Hash material stays out of logs.
        f.write_str("SecretHash([REDACTED])")
    }
}

/// Port: one-way hashing of secrets with constant-time verification.
pub trait SecretHasher: Send + Sync {
    /// Derive a salted one-way hash of the secret.
    fn hash(&self, secret: &str) -> Result<SecretHash, CoreError>;

    /// Check the secret against a stored hash.
    ///
    /// Runs in time independent of where the digests diverge.
    fn verify(&self, secret: &str, hash: &SecretHash) -> bool;
}

/// Port: generation of opaque high-entropy tokens.
pub trait TokenGenerator: Send + Sync {
    /// Produce a fresh token.
    fn generate(&self) -> IssuedToken;
}

/// Argon2id-backed [`SecretHasher`].
///
/// Each hash uses a fresh OS-random salt. Verification re-derives the digest
/// with the stored salt and compares via `subtle::ConstantTimeEq`.
pub struct Argon2SecretHasher {
    argon2: Argon2<'static>,
}

impl Argon2SecretHasher {
    /// Create a hasher with the default Argon2id parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Create a hasher with explicit parameters.
    ///
    /// Tests use cheap parameters; production should keep the defaults.
    pub fn with_params(params: argon2::Params) -> Self {
        Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        }
    }

    fn derive(&self, secret: &str, salt: &[u8]) -> Result<[u8; DIGEST_LEN], CoreError> {
        let mut digest = [0u8; DIGEST_LEN];
        self.argon2
            .hash_password_into(secret.as_bytes(), salt, &mut digest)
            .map_err(|e| CoreError::HashingFailed(e.to_string()))?;
        Ok(digest)
    }
}

impl Default for Argon2SecretHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretHasher for Argon2SecretHasher {
    fn hash(&self, secret: &str) -> Result<SecretHash, CoreError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let digest = self.derive(secret, &salt)?;

        let mut bytes = Vec::with_capacity(SALT_LEN + DIGEST_LEN);
        bytes.extend_from_slice(&salt);
        bytes.extend_from_slice(&digest);
        Ok(SecretHash(bytes))
    }

    fn verify(&self, secret: &str, hash: &SecretHash) -> bool {
        let Ok(candidate) = self.derive(secret, hash.salt()) else {
            return false;
        };
        candidate.as_slice().ct_eq(hash.digest()).into()
    }
}

/// [`TokenGenerator`] backed by the operating system CSPRNG.
///
/// Tokens are 32 random bytes, hex-encoded.
#[derive(Default)]
pub struct RandomTokenGenerator;

impl RandomTokenGenerator {
    /// Create a new generator.
    pub fn new() -> Self {
        Self
    }
}

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> IssuedToken {
        let mut bytes = [0u8; TOKEN_LEN];
        OsRng.fill_bytes(&mut bytes);
        IssuedToken::new(hex::encode(bytes))
    }
}
