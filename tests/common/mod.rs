//! Test helpers for Web API integration tests.
//!
//! Builds a router over an in-memory database, an in-memory cache and a
//! temporary blob directory.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{HeaderName, AUTHORIZATION};
use axum_test::TestServer;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};
use tempfile::TempDir;

use files_manager::config::WebConfig;
use files_manager::file::{BlobStore, FileService, DEFAULT_MAX_UPLOAD_SIZE};
use files_manager::web::create_router;
use files_manager::web::middleware::TOKEN_HEADER;
use files_manager::{AppState, Cache, Database, SessionStore};

/// Session token header.
pub fn x_token() -> HeaderName {
    HeaderName::from_static(TOKEN_HEADER)
}

/// A running test server and the collaborators behind it.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    /// Blob directory; removed when the app is dropped.
    pub blobs: TempDir,
}

/// Create a test server with default limits.
pub async fn create_test_app() -> TestApp {
    create_test_app_with(DEFAULT_MAX_UPLOAD_SIZE, Duration::from_secs(3600)).await
}

/// Create a test server with a custom upload limit and session lifetime.
pub async fn create_test_app_with(max_upload_size: u64, session_ttl: Duration) -> TestApp {
    let blobs = TempDir::new().expect("Failed to create blob directory");

    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );
    let cache = Cache::open_in_memory()
        .await
        .expect("Failed to create test cache");

    let state = Arc::new(AppState::new(
        db.clone(),
        SessionStore::new(cache, session_ttl),
        FileService::new(db, BlobStore::new(blobs.path()), max_upload_size),
    ));

    let router = create_router(state.clone(), &WebConfig::default());
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        state,
        blobs,
    }
}

/// Register a user and return the response body.
pub async fn register_user(server: &TestServer, email: &str, password: &str) -> Value {
    server
        .post("/users")
        .json(&json!({ "email": email, "password": password }))
        .await
        .json::<Value>()
}

/// Basic authorization header value.
pub fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

/// Log in and return the session token.
pub async fn connect(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .get("/connect")
        .add_header(AUTHORIZATION, basic_auth(email, password))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["token"]
        .as_str()
        .expect("token missing")
        .to_string()
}

/// Register a user, log in and return the token.
pub async fn signed_in(server: &TestServer, email: &str) -> String {
    register_user(server, email, "secret").await;
    connect(server, email, "secret").await
}

/// POST /files with the given body and return the response body.
pub async fn create_file(server: &TestServer, token: &str, body: Value) -> Value {
    let response = server
        .post("/files")
        .add_header(x_token(), token.to_string())
        .json(&body)
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Create a folder and return its id.
pub async fn create_folder(server: &TestServer, token: &str, name: &str, parent: &str) -> String {
    let body = create_file(
        server,
        token,
        json!({ "name": name, "type": "folder", "parentId": parent }),
    )
    .await;
    body["id"].as_str().expect("id missing").to_string()
}
