// ============================
// credgate-backend-lib/src/lib.rs
// ============================
//! Core functionality for the `credgate` login service.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod record;
pub mod seed;
pub mod storage;

use std::sync::Arc;

use tracing::info;

use crate::auth::{build_hasher, AuthService, DefaultAuth, PasswordHasher};
use crate::config::Settings;
use crate::storage::CredentialStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Settings the process started with
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state around an injected store and hasher
    pub fn new(store: CredentialStore, hasher: Arc<dyn PasswordHasher>, settings: Settings) -> Self {
        Self {
            auth: Arc::new(DefaultAuth::new(store, hasher)),
            settings: Arc::new(settings),
        }
    }

    /// Open the configured store, seed it if asked, and build the state
    pub async fn bootstrap(settings: Settings) -> anyhow::Result<Self> {
        let store = CredentialStore::from_settings(&settings.storage)?;
        let hasher = build_hasher(&settings.password)?;

        if settings.seed_sample_users {
            let report = seed::seed_users(&store, Arc::clone(&hasher), &seed::sample_users()).await;
            info!(stored = report.stored, failed = report.failed, "sample users seeded");
        }

        Ok(Self::new(store, hasher, settings))
    }
}
