#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use dockforge_core::store::memory::MemoryStore;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use dockforge_api::auth::jwt::JwtConfig;
use dockforge_api::config::ServerConfig;
use dockforge_api::router::build_app_router;
use dockforge_api::state::{AppState, StorageBackend};

pub const TEST_SECRET: &str = "integration-test-secret-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiry_mins: 60,
        },
    }
}

/// Build the full application router backed by a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_app_with_store(Arc::new(MemoryStore::new()))
}

/// Same as [`build_test_app`] but lets the test inspect the store.
pub fn build_app_with_store(store: Arc<MemoryStore>) -> Router {
    let state = AppState::new(test_config(), store, StorageBackend::Memory);
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header("Authorization", format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder(Method::GET, uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder(Method::DELETE, uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    post_json_with(app, uri, body, None).await
}

pub async fn post_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    post_json_with(app, uri, body, Some(token)).await
}

async fn post_json_with(
    app: &Router,
    uri: &str,
    body: Value,
    token: Option<&str>,
) -> Response<Body> {
    let request = builder(Method::POST, uri, token)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

/// Register `name` and return a fresh access token for it.
pub async fn register_and_login(app: &Router, name: &str) -> String {
    let credentials = serde_json::json!({ "name": name, "password": "hunter2hunter2" });

    let response = post_json(app, "/api/v1/auth/register", credentials.clone()).await;
    assert_eq!(response.status(), 201, "registration of {name} failed");

    let response = post_json(app, "/api/v1/auth/login", credentials).await;
    assert_eq!(response.status(), 200, "login of {name} failed");
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// History helpers
// ---------------------------------------------------------------------------

/// List `kind` history until it holds `expected` records.
///
/// Generation records history on a background task, so a listing issued
/// right after a generate request may not include it yet.
pub async fn wait_for_history(app: &Router, kind: &str, token: &str, expected: usize) -> Value {
    let uri = format!("/api/v1/history/{kind}");
    let mut json = Value::Null;
    for _ in 0..100 {
        json = body_json(get_auth(app, &uri, token).await).await;
        if json["data"].as_array().map_or(0, Vec::len) >= expected {
            break;
        }
        tokio::task::yield_now().await;
    }
    json
}
