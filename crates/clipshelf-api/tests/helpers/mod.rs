//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p clipshelf-api`.

pub mod storage;

use axum_test::TestServer;
use clipshelf_api::setup::routes;
use clipshelf_api::state::AppState;
use clipshelf_core::Config;
use clipshelf_storage::{LocalStorage, Storage};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_BUCKET: &str = "media";
pub const TEST_BASE_URL: &str = "http://localhost:8080/files";

/// Test application: server and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: Option<TempDir>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Directory backing the test bucket, when the app uses local storage.
    pub fn bucket_dir(&self) -> Option<std::path::PathBuf> {
        self.temp_dir
            .as_ref()
            .map(|dir| dir.path().join(TEST_BUCKET))
    }
}

/// Build a config from explicit variables, ignoring the process environment.
pub fn test_config(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).expect("Failed to build test config")
}

/// Serve the real router over the given state.
pub fn build_server(config: &Config, storage: Option<Arc<dyn Storage>>) -> TestServer {
    let state = Arc::new(AppState::new(config.clone(), storage));
    let router = routes::setup_routes(config, state).expect("Failed to build routes");
    TestServer::new(router.into_make_service()).expect("Failed to create test server")
}

/// Setup test app backed by local storage in a temp directory.
///
/// `files` are `(key, size)` pairs created inside the bucket before the server starts.
pub async fn setup_test_app(prefix: &str, files: &[(&str, usize)]) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let base_path = temp_dir.path().to_string_lossy().to_string();

    let config = test_config(&[
        ("STORAGE_BACKEND", "local"),
        ("S3_BUCKET", TEST_BUCKET),
        ("S3_PREFIX", prefix),
        ("LOCAL_STORAGE_PATH", &base_path),
        ("LOCAL_STORAGE_BASE_URL", TEST_BASE_URL),
    ]);

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(
            temp_dir.path(),
            TEST_BUCKET.to_string(),
            TEST_BASE_URL.to_string(),
        )
        .await
        .expect("Failed to create local storage"),
    );

    let bucket_dir = temp_dir.path().join(TEST_BUCKET);
    for (key, size) in files {
        write_object(&bucket_dir, key, *size);
    }

    TestApp {
        server: build_server(&config, Some(storage)),
        temp_dir: Some(temp_dir),
    }
}

/// Setup test app with no bucket configured.
pub fn setup_unconfigured_app() -> TestApp {
    let config = test_config(&[]);
    TestApp {
        server: build_server(&config, None),
        temp_dir: None,
    }
}

/// Setup test app over an arbitrary storage implementation.
pub fn setup_app_with_storage(pairs: &[(&str, &str)], storage: Arc<dyn Storage>) -> TestApp {
    let config = test_config(pairs);
    TestApp {
        server: build_server(&config, Some(storage)),
        temp_dir: None,
    }
}

pub fn write_object(bucket_dir: &Path, key: &str, size: usize) {
    let path = bucket_dir.join(key);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create object directory");
    }
    std::fs::write(path, vec![0u8; size]).expect("Failed to write object");
}
