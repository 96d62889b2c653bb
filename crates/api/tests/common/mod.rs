#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use media_engine_api::config::{ChatConfig, JobServiceConfig, ResultStoreConfig, ServerConfig};
use media_engine_api::router::build_app_router;
use media_engine_api::state::AppState;

/// Build a test `ServerConfig` whose upstreams all point at `upstream_uri`
/// (normally a `wiremock::MockServer`).
///
/// No chat API key is set; tests that need one set `config.chat.api_key`.
pub fn test_config(upstream_uri: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        jobs: JobServiceConfig {
            image_deployment_url: format!("{upstream_uri}/deployments/image/executions/"),
            video_deployment_url: format!("{upstream_uri}/deployments/video/executions/"),
            request_timeout_secs: 5,
        },
        chat: ChatConfig {
            api_key: None,
            base_url: upstream_uri.to_string(),
        },
        results: ResultStoreConfig {
            ttl_secs: 3600,
            capacity: 1024,
            sweep_interval_secs: 60,
            max_wait_secs: 5,
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// together with the state it serves, so tests can inspect the store.
pub fn build_test_app(config: ServerConfig) -> (Router, AppState) {
    let state = AppState::from_config(config).unwrap();
    (build_app_router(state.clone()), state)
}

/// A local URL nothing is listening on.
pub fn unused_local_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
