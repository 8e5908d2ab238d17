//! Shared helpers for integration suites that need PostgreSQL.
//!
//! Database-backed suites run only when `GEONOTES_TEST_DATABASE_URL` points
//! at a scratch database. Without it they print a skip marker and return.

use std::sync::OnceLock;

use geonotes::outbound::persistence::run_pending_migrations;
use tokio::runtime::Runtime;

/// Environment variable naming the scratch database.
pub const TEST_DATABASE_URL_ENV: &str = "GEONOTES_TEST_DATABASE_URL";

static MIGRATED: OnceLock<Result<(), String>> = OnceLock::new();

/// Scratch database URL, or `None` when the suite should be skipped.
pub fn test_database_url() -> Option<String> {
    std::env::var(TEST_DATABASE_URL_ENV)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Apply the embedded migrations once per test binary.
///
/// Tests in one binary run concurrently; the lock keeps them from racing on
/// the migrations table.
pub fn migrate_once(runtime: &Runtime, database_url: &str) -> Result<(), String> {
    MIGRATED
        .get_or_init(|| {
            runtime
                .block_on(run_pending_migrations(database_url))
                .map(|_| ())
                .map_err(|err| err.to_string())
        })
        .clone()
}

/// Print the skip marker for `test_name`.
pub fn skip(test_name: &str) {
    eprintln!("SKIP-TEST-DATABASE: {test_name} skipped; set {TEST_DATABASE_URL_ENV} to run it");
}
