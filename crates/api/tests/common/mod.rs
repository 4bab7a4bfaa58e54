//! Shared helpers for the HTTP integration tests.
//!
//! Every test gets a fresh in-memory store and the production router built
//! by [`build_app_router`], so the same middleware stack (auth gate, CORS,
//! request id, timeout, tracing, panic recovery) is exercised.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use buildup_api::auth::jwt::JwtConfig;
use buildup_api::auth::password::PasswordConfig;
use buildup_api::config::ServerConfig;
use buildup_api::router::build_app_router;
use buildup_api::state::AppState;
use buildup_db::memory::MemoryStore;
use buildup_db::Store;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "password123";

/// Test configuration with cheap Argon2 parameters.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "postgres://unused".to_string(),
        database_max_connections: 1,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiry_hours: 24,
        },
        password: PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
            min_length: 8,
        },
        admin: None,
    }
}

/// A router over a fresh in-memory store, plus handles to seed it directly.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub memory: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let memory = Arc::new(MemoryStore::new());
        let config = test_config();
        let state = AppState::new(Store::in_memory(Arc::clone(&memory)), config.clone());
        let router = build_app_router(state.clone(), &config);
        Self {
            router,
            state,
            memory,
        }
    }

    pub fn store(&self) -> &Store {
        &self.state.store
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        self.send(request(Method::GET, uri, token, None)).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
        self.send(request(Method::POST, uri, token, Some(body))).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
        self.send(request(Method::PATCH, uri, token, Some(body))).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
        self.send(request(Method::PUT, uri, token, Some(body))).await
    }

    /// Sign up through the API and return the created user JSON.
    pub async fn signup(&self, body: Value) -> Value {
        let response = self.post("/api/v1/users", None, body).await;
        assert_eq!(response.status(), 201, "signup should succeed");
        body_json(response).await["data"].clone()
    }

    pub async fn signup_builder(&self, email: &str) -> Value {
        self.signup(signup_body(email, json!({ "builder": {} }))).await
    }

    pub async fn signup_coach(&self, email: &str) -> Value {
        self.signup(signup_body(email, json!({ "coach": {} }))).await
    }

    /// Log in with [`PASSWORD`] and return the bearer token.
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .post(
                "/api/v1/auth/login",
                None,
                json!({ "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(response.status(), 200, "login should succeed");
        body_json(response).await["data"]["token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Bootstrap an admin account and return its token.
    pub async fn admin_token(&self) -> String {
        buildup_api::accounts::ensure_admin(
            &self.state.store,
            &self.state.credentials,
            "root@buildup.test",
            PASSWORD,
        )
        .await
        .unwrap();
        self.login("root@buildup.test").await
    }
}

/// Signup body for `email` merged with the role payload in `profile`.
pub fn signup_body(email: &str, profile: Value) -> Value {
    let mut body = json!({
        "email": email,
        "password": PASSWORD,
        "firstName": "Test",
        "lastName": "User",
    });
    if let (Some(target), Some(extra)) = (body.as_object_mut(), profile.as_object()) {
        for (key, value) in extra {
            target.insert(key.clone(), value.clone());
        }
    }
    body
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read the response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
