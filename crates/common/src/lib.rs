// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between `credgate` callers and the login service.
//! This module defines the JSON bodies of the login and health endpoints.

use serde::{Deserialize, Serialize};

/// Body of a `POST /login` request
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body returned on a successful login
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "realname", default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl LoginResponse {
    /// Build the response for an accepted login
    pub fn accepted(real_name: String, email: String) -> Self {
        Self {
            success: true,
            message: "Login successful".to_string(),
            real_name: Some(real_name),
            email: Some(email),
        }
    }
}

/// Body returned for every failed request
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Body of `GET /health`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
            message: "Login service is running".to_string(),
        }
    }
}
