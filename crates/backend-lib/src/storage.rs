// ============================
// credgate-backend-lib/src/storage.rs
// ============================
//! Credential store: user records keyed by username over a KV backend.
pub mod backend;

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::config::{StorageBackend, StorageSettings};
use crate::record::{self, UserRecord};

pub use backend::{BackendError, FlatFileBackend, KvBackend, MemoryBackend};

/// Prefix prepended to a username to form its store key
pub const KEY_PREFIX: &str = "login_";

/// Credential store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no record stored for this user")]
    NotFound,

    #[error("store unavailable: {0}")]
    Unavailable(#[from] BackendError),

    #[error("malformed record: {0}")]
    MalformedRecord(#[from] serde_json::Error),
}

/// Derive the store key for a username
pub fn store_key(username: &str) -> String {
    format!("{KEY_PREFIX}{username}")
}

/// Reads and writes [`UserRecord`]s through a [`KvBackend`]
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn KvBackend>,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Open the backend named in the settings
    pub fn from_settings(settings: &StorageSettings) -> anyhow::Result<Self> {
        let backend: Arc<dyn KvBackend> = match settings.backend {
            StorageBackend::Memory => Arc::new(MemoryBackend::new()),
            StorageBackend::File => Arc::new(FlatFileBackend::new(&settings.path)?),
        };
        Ok(Self::new(backend))
    }

    /// Unconditionally overwrite the record for `username`
    pub async fn put(&self, username: &str, record: &UserRecord) -> Result<(), StoreError> {
        let bytes = record::encode(record)?;
        self.backend.set(&store_key(username), &bytes).await?;
        debug!(username, "stored user record");
        Ok(())
    }

    /// Fetch the record for `username`
    pub async fn get(&self, username: &str) -> Result<UserRecord, StoreError> {
        let bytes = self
            .backend
            .get(&store_key(username))
            .await?
            .ok_or(StoreError::NotFound)?;
        record::decode(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct DownBackend;

    #[async_trait]
    impl KvBackend for DownBackend {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, BackendError> {
            Err(BackendError::Unavailable("connection refused".into()))
        }

        async fn set(&self, _key: &str, _value: &[u8]) -> Result<(), BackendError> {
            Err(BackendError::Unavailable("connection refused".into()))
        }
    }

    fn admin_record() -> UserRecord {
        UserRecord {
            real_name: "Administrator".into(),
            email: "admin@example.com".into(),
            password_digest: "digest".into(),
        }
    }

    #[test]
    fn store_key_uses_prefix() {
        assert_eq!(store_key("john_doe"), "login_john_doe");
        assert_eq!(store_key(""), "login_");
        assert_ne!(store_key("a_b"), store_key("a"));
    }

    #[tokio::test]
    async fn put_writes_under_derived_key() {
        let backend = Arc::new(MemoryBackend::new());
        let store = CredentialStore::new(backend.clone());

        store.put("admin", &admin_record()).await.unwrap();
        let raw = backend.get("login_admin").await.unwrap().unwrap();
        assert_eq!(record::decode(&raw).unwrap(), admin_record());
        assert_eq!(store.get("admin").await.unwrap(), admin_record());
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store = CredentialStore::new(Arc::new(MemoryBackend::new()));
        assert!(matches!(store.get("ghost").await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn get_corrupt_is_malformed() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("login_admin", b"{\"realname\":").await.unwrap();
        let store = CredentialStore::new(backend);
        assert!(matches!(
            store.get("admin").await,
            Err(StoreError::MalformedRecord(_))
        ));
    }

    #[tokio::test]
    async fn backend_failure_is_unavailable() {
        let store = CredentialStore::new(Arc::new(DownBackend));
        assert!(matches!(store.get("admin").await, Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.put("admin", &admin_record()).await,
            Err(StoreError::Unavailable(_))
        ));
    }

    #[test]
    fn from_settings_opens_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let settings = StorageSettings {
            backend: StorageBackend::File,
            path: dir.path().join("records"),
        };
        CredentialStore::from_settings(&settings).unwrap();
        assert!(dir.path().join("records").is_dir());
    }
}
