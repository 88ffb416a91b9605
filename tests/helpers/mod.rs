//! Shared test helpers for integration tests.
//!
//! Every `TestApp` runs the full router over in-memory stores and an
//! in-memory object store, so tests need no external services.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use filevault_api::AppState;
use filevault_core::config::AppConfig;
use filevault_database::Stores;
use filevault_storage::providers::MemoryObjectStore;

/// Multipart boundary used by `upload`.
const BOUNDARY: &str = "filevault-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing object store, for asserting on stored blobs
    pub objects: Arc<MemoryObjectStore>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with default configuration.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a new test application with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let objects = Arc::new(MemoryObjectStore::new());
        let state = AppState::new(config.clone(), Stores::in_memory(), objects.clone())
            .expect("Failed to build app state");

        Self {
            router: filevault_api::build_app(state),
            objects,
            config,
        }
    }

    /// Register a user, asserting success.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/auth/register",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                    "name": name,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Register failed: {:?}",
            response.body
        );
        response.body["data"]["user"].clone()
    }

    /// Login and return the bearer token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self.request("POST", "/auth/login", Some(body), None).await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Register then login, returning the token.
    pub async fn signup(&self, email: &str) -> String {
        self.register(email, "password123", "Test User").await;
        self.login(email, "password123").await
    }

    /// Make a JSON HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body = body
            .map(|b| Body::from(serde_json::to_vec(&b).expect("Failed to serialize body")))
            .unwrap_or_else(Body::empty);

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        self.send(req.body(body).expect("Failed to build request"))
            .await
    }

    /// Upload `content` as a multipart `file` field named `file_name`.
    pub async fn upload(&self, token: &str, file_name: &str, content: &[u8]) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: text/plain\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/files/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload and return the created file record, asserting success.
    pub async fn upload_ok(&self, token: &str, file_name: &str, content: &[u8]) -> Value {
        let response = self.upload(token, file_name, content).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Upload failed: {:?}",
            response.body
        );
        response.body["data"]["file"].clone()
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes()
            .to_vec();

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            bytes,
        }
    }
}

/// Configuration for tests: in-memory everything and a fixed signing key.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body, `Null` for non-JSON bodies
    pub body: Value,
    /// Raw body
    pub bytes: Vec<u8>,
}

/// Versions of the file records in a `{ files }` listing, in response order.
pub fn file_versions(body: &Value) -> Vec<i64> {
    body["data"]["files"]
        .as_array()
        .expect("files array")
        .iter()
        .map(|f| f["version"].as_i64().expect("version"))
        .collect()
}
