//! Test utilities shared by the integration tests.
//!
//! Provides:
//! - Temporary database fixtures
//! - A router backed by a fresh database
//! - JSON request helpers for `oneshot` calls

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use picnic::config::Config;
use picnic::http::{create_router, AppState};
use picnic::observability::tracing::init_test_tracing;
use picnic::storage::{Database, StorageConfig};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

/// Test fixture that manages a temporary database directory.
///
/// The directory is automatically cleaned up when the fixture is dropped.
pub struct TestFixture {
    /// Temporary directory for test database
    pub temp_dir: TempDir,
    /// Path to the database file
    pub db_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with a temporary database directory.
    pub fn new() -> Self {
        init_test_tracing();
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let db_path = temp_dir.path().join("picnic.db");
        Self { temp_dir, db_path }
    }

    /// Server configuration pointing at the fixture's database.
    pub fn config(&self) -> Config {
        Config::test_config(self.db_path.clone())
    }

    /// Open the fixture's database with the given settings.
    pub fn open(&self, config: StorageConfig) -> Database {
        Database::open(&self.db_path, config).expect("failed to open database")
    }

    /// Router over the fixture's database.
    pub fn router(&self, config: StorageConfig) -> Router {
        create_router(AppState::new(self.open(config)))
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Send one request through the router and decode the JSON reply.
///
/// Returns `Value::Null` for empty or non-JSON bodies.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.temp_dir.path().exists());
        assert!(fixture.db_path.ends_with("picnic.db"));
    }
}
