// ============================
// credgate-backend-lib/src/seed.rs
// ============================
//! Best-effort population of sample users at startup.
use std::sync::Arc;

use ::metrics::counter;
use tracing::{info, warn};

use crate::auth::PasswordHasher;
use crate::metrics::SEED_USER;
use crate::record::UserRecord;
use crate::storage::CredentialStore;

/// A user to seed, with its plaintext password
#[derive(Debug, Clone)]
pub struct SampleUser {
    pub username: &'static str,
    pub real_name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

/// Tally of a seeding run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub stored: usize,
    pub failed: usize,
}

/// The demo accounts
pub fn sample_users() -> Vec<SampleUser> {
    vec![
        SampleUser {
            username: "john_doe",
            real_name: "John Doe",
            email: "john.doe@example.com",
            password: "password123",
        },
        SampleUser {
            username: "jane_smith",
            real_name: "Jane Smith",
            email: "jane.smith@example.com",
            password: "mypassword",
        },
        SampleUser {
            username: "admin",
            real_name: "Administrator",
            email: "admin@example.com",
            password: "admin123",
        },
    ]
}

/// Write each user through the store, one at a time.
///
/// Failures are logged and counted; they never stop the run. Hashing runs
/// on the blocking pool.
pub async fn seed_users(
    store: &CredentialStore,
    hasher: Arc<dyn PasswordHasher>,
    users: &[SampleUser],
) -> SeedReport {
    let mut report = SeedReport::default();

    for user in users {
        let worker = Arc::clone(&hasher);
        let SampleUser {
            real_name,
            email,
            password,
            ..
        } = *user;
        let hashed = tokio::task::spawn_blocking(move || {
            UserRecord::with_password(real_name, email, password, worker.as_ref())
        })
        .await;

        let record = match hashed {
            Ok(Ok(record)) => record,
            Ok(Err(e)) => {
                warn!(username = user.username, error = %e, "failed to hash sample user password");
                counter!(SEED_USER, "result" => "failed").increment(1);
                report.failed += 1;
                continue;
            }
            Err(e) => {
                warn!(username = user.username, error = %e, "sample user hashing task failed");
                counter!(SEED_USER, "result" => "failed").increment(1);
                report.failed += 1;
                continue;
            }
        };

        match store.put(user.username, &record).await {
            Ok(()) => {
                info!(username = user.username, "seeded user");
                counter!(SEED_USER, "result" => "stored").increment(1);
                report.stored += 1;
            }
            Err(e) => {
                warn!(username = user.username, error = %e, "failed to seed user");
                counter!(SEED_USER, "result" => "failed").increment(1);
                report.failed += 1;
            }
        }
    }

    report
}
