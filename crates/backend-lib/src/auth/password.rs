// ============================
// credgate-backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use std::sync::Arc;

use scrypt::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as PhcHasher, PasswordVerifier, SaltString,
    },
    Params, Scrypt,
};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use thiserror::Error;

use crate::config::PasswordSettings;

/// Length of a legacy SHA-1 digest once hex encoded
pub const LEGACY_DIGEST_LEN: usize = 40;

/// Derived key length written into scrypt PHC strings
const SCRYPT_KEY_LEN: usize = 32;

/// Errors raised while producing a password digest
#[derive(Error, Debug)]
pub enum HashError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] scrypt::password_hash::Error),

    #[error("invalid scrypt parameters: {0}")]
    Params(#[from] scrypt::errors::InvalidParams),
}

/// One-way transform from a plaintext password to a stored digest.
///
/// `hash` runs once, when a record is written. `verify` runs on every login
/// and must not exit early on the first differing byte.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, HashError>;
    fn verify(&self, digest: &str, plain: &str) -> bool;
}

/// Which hasher records are written and checked with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PasswordScheme {
    /// Salted scrypt, stored as a PHC string
    #[default]
    Scrypt,
    /// Unsalted hex SHA-1, readable by the legacy login system
    LegacySha1,
}

/// Salted, memory-hard hashing via scrypt
#[derive(Debug, Clone, Copy)]
pub struct ScryptHasher {
    params: Params,
}

impl ScryptHasher {
    /// Hasher with explicit cost parameters
    pub fn new(log_n: u8, r: u32, p: u32) -> Result<Self, HashError> {
        let params = Params::new(log_n, r, p, SCRYPT_KEY_LEN)?;
        Ok(Self { params })
    }
}

impl Default for ScryptHasher {
    fn default() -> Self {
        Self {
            params: Params::recommended(),
        }
    }
}

impl PasswordHasher for ScryptHasher {
    fn hash(&self, plain: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password_customized(plain.as_bytes(), None, None, self.params, &salt)?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, digest: &str, plain: &str) -> bool {
        let parsed_hash = match PasswordHash::new(digest) {
            Ok(h) => h,
            Err(_) => return false,
        };
        Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
    }
}

/// Legacy digest: lowercase hex SHA-1 of the password bytes.
///
/// SHA-1 is fast and unsalted. Only use this to read data written by the
/// old login system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacySha1;

impl PasswordHasher for LegacySha1 {
    fn hash(&self, plain: &str) -> Result<String, HashError> {
        Ok(hex::encode(Sha1::digest(plain.as_bytes())))
    }

    fn verify(&self, digest: &str, plain: &str) -> bool {
        let attempt = hex::encode(Sha1::digest(plain.as_bytes()));
        constant_time_eq(digest.as_bytes(), attempt.as_bytes())
    }
}

/// Build the hasher selected by the settings
pub fn build_hasher(settings: &PasswordSettings) -> Result<Arc<dyn PasswordHasher>, HashError> {
    let hasher: Arc<dyn PasswordHasher> = match settings.scheme {
        PasswordScheme::Scrypt => Arc::new(ScryptHasher::new(
            settings.scrypt_log_n,
            settings.scrypt_r,
            settings.scrypt_p,
        )?),
        PasswordScheme::LegacySha1 => Arc::new(LegacySha1),
    };
    Ok(hasher)
}

/// Byte comparison whose running time depends only on the lengths.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
