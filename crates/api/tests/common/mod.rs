#![allow(dead_code)]

use std::sync::Arc;

use agrega_api::config::ServerConfig;
use agrega_api::router::build_app_router;
use agrega_api::state::AppState;
use agrega_db::InMemoryProjectRepo;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router backed by a fresh, empty store.
///
/// Uses the same builder as `main.rs` so tests exercise the production
/// middleware stack. Clone the returned router to send several requests
/// against the same store.
pub fn build_test_app() -> Router {
    let state = AppState {
        projects: Arc::new(InMemoryProjectRepo::new()),
    };
    build_app_router(state, &test_config())
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body.to_string())).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, body.to_string())).await
}

pub fn json_request(method: Method, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a project and return its JSON representation.
pub async fn create_project(app: &Router, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(app, "/api/projects", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
