use std::sync::Arc;

use ::metrics::counter;
use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::auth::{AuthFailure, AuthResult, AuthService, PasswordHasher};
use crate::metrics::{AUTH_ATTEMPT, AUTH_OUTCOME};
use crate::record::UserRecord;
use crate::storage::{CredentialStore, StoreError};

/// Checks credentials against records in a [`CredentialStore`].
///
/// Holds no per-user state; every call re-reads the store.
pub struct DefaultAuth {
    store: CredentialStore,
    hasher: Arc<dyn PasswordHasher>,
}

impl DefaultAuth {
    pub fn new(store: CredentialStore, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    async fn check(&self, username: &str, password: &str) -> AuthResult {
        if username.is_empty() || password.is_empty() {
            return AuthResult::InvalidRequest;
        }

        let record = match self.store.get(username).await {
            Ok(record) => record,
            Err(StoreError::NotFound) => {
                debug!(username, "login for unknown user");
                // Pay for one hash so unknown users take as long as wrong passwords
                let hasher = Arc::clone(&self.hasher);
                let password = password.to_owned();
                if let Err(e) = tokio::task::spawn_blocking(move || hasher.hash(&password)).await {
                    debug!(username, error = %e, "dummy hash task failed");
                }
                return AuthResult::Rejected;
            }
            Err(e) => return AuthResult::ServiceError(e.into()),
        };

        let UserRecord {
            real_name,
            email,
            password_digest,
        } = record;
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let verified =
            tokio::task::spawn_blocking(move || hasher.verify(&password_digest, &password)).await;

        match verified {
            Ok(true) => AuthResult::Accepted { real_name, email },
            Ok(false) => {
                debug!(username, "password mismatch");
                AuthResult::Rejected
            }
            Err(e) => AuthResult::ServiceError(AuthFailure::Worker(e)),
        }
    }
}

#[async_trait]
impl AuthService for DefaultAuth {
    async fn authenticate(&self, username: &str, password: &str) -> AuthResult {
        counter!(AUTH_ATTEMPT).increment(1);

        let result = self.check(username, password).await;
        match &result {
            AuthResult::Accepted { .. } => info!(username, "login accepted"),
            AuthResult::ServiceError(cause) => error!(username, error = %cause, "login failed"),
            _ => {}
        }
        counter!(AUTH_OUTCOME, "result" => result.label()).increment(1);
        result
    }
}
