#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use shinigami::common::security::hash_password;
use shinigami::config::settings::AppConfig;
use shinigami::modules::auth::model::UserRole;
use shinigami::modules::auth::repository::AuthRepository;
use shinigami::modules::auth::service::AuthService;
use shinigami::state::AppState;
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_UPLOAD_LIMIT: u64 = 64 * 1024;
pub const BOUNDARY: &str = "shinigami-test-boundary";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _data_dir: TempDir,
}

pub fn test_config(data_directory: PathBuf, max_upload_bytes: u64) -> AppConfig {
    AppConfig {
        server_port: 0,
        database_url: "sqlite::memory:".to_string(),
        data_directory,
        public_directory: None,
        jwt_secret: "test-secret".to_string(),
        jwt_ttl_hours: 1,
        max_upload_bytes,
        admin_seed: None,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_limit(TEST_UPLOAD_LIMIT).await
}

pub async fn spawn_app_with_limit(max_upload_bytes: u64) -> TestApp {
    let data_dir = tempfile::tempdir().expect("Failed to create data dir");
    let config = test_config(data_dir.path().to_path_buf(), max_upload_bytes);

    let state = shinigami::app::build_state(config)
        .await
        .expect("Failed to create app state");
    let app = shinigami::app::create_app(state.clone());

    TestApp {
        app,
        state,
        _data_dir: data_dir,
    }
}

impl TestApp {
    /// Creates a user with `role` directly in the store and returns a token.
    pub async fn token_for(&self, username: &str, role: UserRole) -> String {
        let hash = hash_password("password123").unwrap();
        let user = AuthRepository::create_user(
            &self.state.db,
            username,
            &format!("{}@example.com", username),
            &hash,
            role,
        )
        .await
        .unwrap();
        AuthService::create_access_token(&self.state.config, user.id).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::DELETE).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn upload(
        &self,
        uri: &str,
        token: Option<&str>,
        field: &str,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = multipart_body(field, file_name, content_type, data);
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Every entry in the upload directory, part files included.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.state.storage.root())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn empty_multipart_body() -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"note\"\r\n\r\nhello");
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}
