// ============================
// credgate-backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Json, Toml, Yaml},
    Figment,
};
use serde::Deserialize;

use crate::auth::{PasswordScheme, ScryptHasher};

/// Prefix for environment overrides, e.g. `CREDGATE_STORAGE__BACKEND=file`
pub const ENV_PREFIX: &str = "CREDGATE_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// Where user records live
    pub storage: StorageSettings,
    /// How passwords are hashed
    pub password: PasswordSettings,
    /// Write the sample users at startup
    pub seed_sample_users: bool,
}

/// Which KV backend holds the records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Root directory for the `file` backend
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PasswordSettings {
    pub scheme: PasswordScheme,
    pub scrypt_log_n: u8,
    pub scrypt_r: u32,
    pub scrypt_p: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_level: "info".to_string(),
            storage: StorageSettings::default(),
            password: PasswordSettings::default(),
            seed_sample_users: true,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: PathBuf::from("data/users"),
        }
    }
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self {
            scheme: PasswordScheme::Scrypt,
            scrypt_log_n: 15,
            scrypt_r: 8,
            scrypt_p: 1,
        }
    }
}

impl Settings {
    /// Layered sources: an explicit file, or `config.{toml,yaml,json}` in the
    /// working directory, then `CREDGATE_` environment variables.
    pub fn figment(path: Option<&Path>) -> Figment {
        let figment = match path {
            Some(path) => match path.extension().and_then(|e| e.to_str()) {
                Some("yaml" | "yml") => Figment::new().merge(Yaml::file(path)),
                Some("json") => Figment::new().merge(Json::file(path)),
                _ => Figment::new().merge(Toml::file(path)),
            },
            None => Figment::new()
                .merge(Toml::file("config.toml"))
                .merge(Yaml::file("config.yaml"))
                .merge(Json::file("config.json")),
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load and validate settings from the default locations
    pub fn load() -> Result<Self> {
        Self::extract(Self::figment(None))
    }

    /// Load and validate settings from an explicit file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        Self::extract(Self::figment(Some(path)))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let settings: Settings = figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the service cannot start with
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            bail!("invalid log level: {}", self.log_level);
        }
        if self.storage.backend == StorageBackend::File && self.storage.path.as_os_str().is_empty() {
            bail!("storage.path is required for the file backend");
        }
        if self.password.scheme == PasswordScheme::Scrypt {
            ScryptHasher::new(
                self.password.scrypt_log_n,
                self.password.scrypt_r,
                self.password.scrypt_p,
            )?;
        }
        Ok(())
    }
}
