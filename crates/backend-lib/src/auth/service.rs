use async_trait::async_trait;
use thiserror::Error;

use crate::storage::StoreError;

/// Outcome of a single authentication attempt
#[derive(Debug)]
pub enum AuthResult {
    /// Password matched the stored digest
    Accepted { real_name: String, email: String },
    /// Unknown user or wrong password; the two are deliberately the same
    Rejected,
    /// Empty username or password
    InvalidRequest,
    /// Lookup or verification failed; the cause is for logs only
    ServiceError(AuthFailure),
}

impl AuthResult {
    /// Short label used for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            AuthResult::Accepted { .. } => "accepted",
            AuthResult::Rejected => "rejected",
            AuthResult::InvalidRequest => "invalid_request",
            AuthResult::ServiceError(_) => "service_error",
        }
    }
}

/// Internal causes behind [`AuthResult::ServiceError`]
#[derive(Error, Debug)]
pub enum AuthFailure {
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),

    #[error("password verification task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> AuthResult;
}
