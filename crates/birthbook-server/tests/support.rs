#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use birthbook_core::{MalformedBirthdayPolicy, User, UserStore};
use birthbook_server::app::{build_router, AppState};
use birthbook_server::config::ServerConfig;
use serde_json::Value;
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

pub fn init_test_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("birthbook_server=debug,birthbook_core=debug"))
            .with_test_writer()
            .try_init();
    });
}

pub async fn temp_store() -> Arc<dyn UserStore> {
    let db_path = std::env::temp_dir().join(format!(
        "birthbook-server-test-{}.sqlite",
        Uuid::now_v7().simple()
    ));
    let db_url = format!("sqlite://{}", db_path.display());
    let store = birthbook_db::open_store(&db_url, 1)
        .await
        .expect("open sqlite store");
    store.migrate().await.expect("migrate");
    store
}

pub struct TestApp {
    pub app: axum::Router,
    pub store: Arc<dyn UserStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn error_code(&self) -> String {
        self.json()["error"]
            .as_str()
            .expect("error code")
            .to_string()
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(ServerConfig::default()).await
    }

    pub async fn with_policy(policy: MalformedBirthdayPolicy) -> Self {
        let mut config = ServerConfig::default();
        config.search.malformed_birthdays = policy;
        Self::with_config(config).await
    }

    pub async fn with_config(config: ServerConfig) -> Self {
        init_test_tracing();
        let store = temp_store().await;
        let state = AppState::new(store.clone(), config);
        Self {
            app: build_router(state),
            store,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("response");
        let status = response.status();
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body")
            .to_vec();
        TestResponse {
            status,
            content_type,
            body,
        }
    }

    pub async fn send_json(&self, method: Method, path: &str, body: Value) -> TestResponse {
        self.send_raw(method, path, body.to_string()).await
    }

    pub async fn send_raw(&self, method: Method, path: &str, body: String) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .expect("request");
        self.send(request).await
    }

    pub async fn send_empty(&self, method: Method, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send_empty(Method::GET, path).await
    }

    /// Creates a user through the API and returns its id.
    pub async fn create_user(&self, name: &str, birthday: &str) -> String {
        let response = self
            .send_json(
                Method::POST,
                "/users",
                serde_json::json!({ "name": name, "birthday": birthday }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        response.json()["id"]
            .as_str()
            .expect("user id")
            .to_string()
    }

    /// Writes a record straight to the store, skipping request validation.
    pub async fn seed_raw(&self, name: &str, birthday: &str) -> User {
        let user = User::new_active(name, birthday);
        self.store.insert(&user).await.expect("insert");
        user
    }
}
