//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p filedrop-api`.

#![allow(dead_code)]

pub mod mock_storage;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use filedrop_api::setup::routes;
use filedrop_api::state::AppState;
use filedrop_core::{Config, UploaderConfig};
use filedrop_storage::Storage;
use mock_storage::MockStorage;
use std::collections::HashMap;
use std::sync::Arc;

pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// Test application: server plus the storage it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub storage: MockStorage,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Configuration with defaults only, plus the given overrides.
pub fn test_config(vars: &[(&str, &str)]) -> Config {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = UploaderConfig::from_lookup(|key| map.get(key).cloned())
        .expect("Failed to build test configuration");
    Config(Box::new(config))
}

/// Build a test server around an arbitrary storage backend.
pub fn server_with_storage(config: Config, storage: Arc<dyn Storage>) -> TestServer {
    let state = Arc::new(AppState::new(&config, storage));
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}

/// Setup test app with default configuration and in-memory storage.
pub fn setup_test_app() -> TestApp {
    let storage = MockStorage::new();
    let server = server_with_storage(test_config(&[]), Arc::new(storage.clone()));
    TestApp { server, storage }
}

/// Multipart form with one `file` part.
pub fn file_form(filename: &str, content_type: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(filename.to_string())
        .mime_type(content_type.to_string());
    MultipartForm::new().add_part("file", part)
}
