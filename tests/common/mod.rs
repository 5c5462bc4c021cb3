#![allow(dead_code)]

use agora_backend::app::app::{build_router, Services, Stores};
use agora_backend::config::upload_conf::UploadConfig;
use agora_backend::config::PolicyConfig;
use agora_backend::model::{blog::Blog, category::Category, group::Group, user::User};
use agora_backend::repository::memory_repo::MemoryRepository;
use agora_backend::repository::Repository;
use agora_backend::util::storage::LocalFileStorage;
use axum::{body::to_bytes, body::Body, http::{Request, StatusCode}, Router};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt; // for .oneshot()

pub const BOUNDARY: &str = "agora-test-boundary";
const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Router over in-memory stores. The upload directory lives as long as this value.
pub struct TestApp {
    pub router: Router,
    pub upload_dir: TempDir,
}

pub async fn setup_app() -> TestApp {
    setup_app_with_policy(PolicyConfig::default()).await
}

pub async fn setup_app_with_policy(policy: PolicyConfig) -> TestApp {
    build_app(Arc::new(MemoryRepository::<User>::new()), policy).await
}

/// Same app, with the user store swapped for `users`.
pub async fn setup_app_with_users(users: Arc<dyn Repository<User>>) -> TestApp {
    build_app(users, PolicyConfig::default()).await
}

async fn build_app(users: Arc<dyn Repository<User>>, policy: PolicyConfig) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("temp upload dir");
    let upload_config = UploadConfig { dir: upload_dir.path().to_path_buf(), max_bytes: MAX_UPLOAD_BYTES };
    let storage = LocalFileStorage::new(&upload_config).await.expect("local storage");

    let stores = Stores {
        users,
        categories: Arc::new(MemoryRepository::<Category>::new()),
        groups: Arc::new(MemoryRepository::<Group>::new()),
        blogs: Arc::new(MemoryRepository::<Blog>::new()),
        storage: Arc::new(storage),
    };
    let services = Services::new(stores, policy);
    TestApp { router: build_router(&services, MAX_UPLOAD_BYTES), upload_dir }
}

impl TestApp {
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.call(req).await
    }

    pub async fn send_multipart(&self, method: &str, uri: &str, body: Vec<u8>) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(Body::from(body))
            .unwrap();
        self.call(req).await
    }

    pub async fn get_raw(&self, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let req = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let bytes = to_bytes(resp.into_body(), 4 * 1024 * 1024).await.unwrap();
        (status, content_type, bytes.to_vec())
    }

    async fn call(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body_bytes = to_bytes(resp.into_body(), 4 * 1024 * 1024).await.unwrap();
        let json = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// Create a record and return its id.
    pub async fn create(&self, resource: &str, body: Value) -> String {
        let (status, json) = self.send("POST", &format!("/api/{}", resource), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "create {} failed: {}", resource, json);
        json["data"]["_id"].as_str().unwrap().to_string()
    }
}

/// Builds a multipart/form-data body using [`BOUNDARY`].
#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, content: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, filename, content_type
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(content);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.bytes.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        self.bytes
    }
}
