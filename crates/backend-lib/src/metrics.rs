// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for Prometheus metric keys
pub const AUTH_ATTEMPT: &str = "auth.attempt";
pub const AUTH_OUTCOME: &str = "auth.outcome";
pub const SEED_USER: &str = "seed.user";
pub const HTTP_LOGIN: &str = "http.login";
