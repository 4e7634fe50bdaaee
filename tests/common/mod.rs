//! Test helpers for HTTP API tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use filedrop::web::handlers::AppState;
use filedrop::web::router::{create_router, create_static_router};
use filedrop::FileStore;
use tempfile::TempDir;

/// A test server over a temporary upload and static directory.
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: TempDir,
}

impl TestApp {
    /// Directory holding uploaded files.
    pub fn upload_dir(&self) -> PathBuf {
        self.temp_dir.path().join("uploaded")
    }

    /// Directory served under `/static`.
    pub fn static_dir(&self) -> PathBuf {
        self.temp_dir.path().join("static")
    }

    /// Names of the regular files in the upload directory.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir())
            .unwrap()
            .flatten()
            .filter(|e| e.file_type().unwrap().is_file())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Upload `content` under `filename` in the `file` field.
    pub async fn upload(&self, filename: &str, content: &[u8]) -> TestResponse {
        let form = MultipartForm::new()
            .add_part("file", Part::bytes(content.to_vec()).file_name(filename));
        self.server.post("/upload").multipart(form).await
    }
}

/// Create a test server with empty upload and static directories.
pub async fn create_test_app() -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let upload_dir = temp_dir.path().join("uploaded");
    let static_dir = temp_dir.path().join("static");
    std::fs::create_dir_all(&static_dir).expect("Failed to create static dir");

    let store = FileStore::open(&upload_dir)
        .await
        .expect("Failed to open file store");
    let app_state = Arc::new(AppState::new(store));

    let router = create_router(app_state).merge(create_static_router(&static_dir));
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, temp_dir }
}
