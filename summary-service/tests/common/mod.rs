#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use std::sync::Arc;
use summary_service::config::SummaryConfig;
use summary_service::services::providers::ChatProvider;
use summary_service::{build_router, AppState};
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "sk-test-key";
pub const TEST_MODEL: &str = "gpt-3.5-turbo";

/// Configuration pointing at `base_url`, with everything else at defaults.
pub fn test_config(base_url: &str) -> SummaryConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("OPENAI_API_KEY", TEST_API_KEY.to_string()),
        ("OPENAI_MODEL", TEST_MODEL.to_string()),
        ("OPENAI_BASE_URL", base_url.to_string()),
    ]);

    SummaryConfig::from_lookup(CoreConfig { port: 0 }, |key| vars.get(key).cloned())
        .expect("Failed to build test configuration")
}

pub fn test_router(provider: Arc<dyn ChatProvider>) -> Router {
    build_router(AppState::new(
        test_config("http://127.0.0.1:1/v1"),
        provider,
    ))
}

pub fn summary_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/summary")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send one request and return status plus decoded JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}
