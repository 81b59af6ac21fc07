// ============================
// credgate-backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
mod service;
mod service_impl;

pub use password::{
    build_hasher, HashError, LegacySha1, PasswordHasher, PasswordScheme, ScryptHasher,
    LEGACY_DIGEST_LEN,
};
pub use service::{AuthFailure, AuthResult, AuthService};
pub use service_impl::DefaultAuth;
