// ============================
// credgate-backend-lib/src/record.rs
// ============================
//! Stored user records and their at-rest encoding.
use serde::{Deserialize, Serialize};

use crate::auth::{HashError, PasswordHasher};
use crate::storage::StoreError;

/// Identity and credential digest for one user.
///
/// Serialized as JSON with the legacy field names (`realname`, `email`,
/// `password`) so records written by the old login system still decode.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    #[serde(rename = "realname")]
    pub real_name: String,
    pub email: String,
    #[serde(rename = "password")]
    pub password_digest: String,
}

impl UserRecord {
    /// Build a record from a plaintext password, hashing it exactly once
    pub fn with_password(
        real_name: impl Into<String>,
        email: impl Into<String>,
        plain: &str,
        hasher: &dyn PasswordHasher,
    ) -> Result<Self, HashError> {
        Ok(Self {
            real_name: real_name.into(),
            email: email.into(),
            password_digest: hasher.hash(plain)?,
        })
    }
}

/// Encode a record into its storage bytes
pub fn encode(record: &UserRecord) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec(record)?)
}

/// Decode storage bytes into a record
pub fn decode(bytes: &[u8]) -> Result<UserRecord, StoreError> {
    Ok(serde_json::from_slice(bytes)?)
}
