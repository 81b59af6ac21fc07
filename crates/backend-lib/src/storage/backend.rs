// ============================
// credgate-backend-lib/src/storage/backend.rs
// ============================
//! Byte-level key-value backends.
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs as tokio_fs;

/// Failure to reach or operate the backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// `GET key -> bytes | not-found` / `SET key bytes -> ok`
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError>;

    /// Overwrite the value stored under `key`
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), BackendError>;
}

/// In-process backend over a concurrent map
#[derive(Default)]
pub struct MemoryBackend {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), BackendError> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// One file per key under a root directory.
///
/// File names are the hex SHA-256 of the key: fixed length and
/// non-traversing whatever the username.
pub struct FlatFileBackend {
    root: PathBuf,
    tmp_seq: AtomicU64,
}

impl FlatFileBackend {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            tmp_seq: AtomicU64::new(0),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.json", hex::encode(Sha256::digest(key.as_bytes()))))
    }
}

#[async_trait]
impl KvBackend for FlatFileBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        match tokio_fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a temp file, then rename over the target so readers never
    /// see a partial record.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), BackendError> {
        let path = self.path_for(key);
        let seq = self.tmp_seq.fetch_add(1, Ordering::Relaxed);
        // pid keeps temp names distinct across processes sharing the root
        let tmp = path.with_extension(format!("{}.tmp{seq}", std::process::id()));

        let written = match tokio_fs::write(&tmp, value).await {
            Ok(()) => tokio_fs::rename(&tmp, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio_fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}
