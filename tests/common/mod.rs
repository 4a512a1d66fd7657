#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;

use lander::config::Config;
use lander::store::FileStore;
use lander::upload::{ImageHost, UploadError, UploadFile};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "correct horse battery staple";

/// Image host that never leaves the process. Files whose name contains
/// `fail` are rejected the way an unreachable host would be.
pub struct FakeImageHost;

#[async_trait]
impl ImageHost for FakeImageHost {
    async fn upload(&self, file: UploadFile) -> Result<String, UploadError> {
        if file.file_name.contains("fail") {
            return Err(UploadError::Status(400));
        }
        Ok(format!("https://i.example.test/{}", file.file_name))
    }
}

/// A running test server backed by its own data directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub data_dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_dir.path().to_path_buf()
    }

    /// Login through the API and return the response body + status.
    pub async fn login(&self, username: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Login with the configured credentials.
    pub async fn bootstrap(&self) {
        let (body, status) = self.login(USERNAME, PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
    }

    /// Create a project, return the saved record.
    pub async fn create_project(&self, body: &Value) -> Value {
        let (project, status) = self.post_json("/api/v1/projects", body).await;
        assert_eq!(status, StatusCode::OK, "create project failed: {project}");
        project
    }

    pub async fn get_json(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// A minimal valid project body for the given template.
pub fn project_body(website_name: &str, template: &str) -> Value {
    json!({
        "websiteName": website_name,
        "productTitle": "Widget",
        "shortDescription": "Best widget",
        "fullDescription": "<p>Great</p>",
        "price": "19.99",
        "buyButtonText": "Buy Now",
        "productPhotos": [],
        "template": template,
    })
}

pub fn test_config(data_dir: PathBuf) -> Config {
    Config {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        data_dir,
        admin_username: USERNAME.to_string(),
        admin_password_hash: lander::auth::password::hash(PASSWORD).expect("hash password"),
        default_password: false,
        imgbb_api_key: Some("test-key".to_string()),
        upload_url: "http://127.0.0.1:9/upload".to_string(),
        redirect_delay: None,
        copyright_year: 2024,
        max_upload_size: 1024 * 1024,
        log_level: "warn".to_string(),
        secure_cookies: false,
    }
}

/// A client with its own cookie jar, so each one is a separate browser.
pub fn new_client() -> Client {
    Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .expect("build client")
}

/// Spawn a test app with a fresh data directory.
pub async fn spawn_app() -> TestApp {
    let data_dir = tempfile::tempdir().expect("create temp dir");
    let config = test_config(data_dir.path().to_path_buf());

    let store = FileStore::open(data_dir.path())
        .await
        .expect("open file store");
    let app = lander::build_app(config, Arc::new(store), Arc::new(FakeImageHost));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });

    let client = new_client();

    TestApp {
        addr,
        client,
        data_dir,
    }
}
