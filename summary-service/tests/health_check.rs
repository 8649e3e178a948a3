//! Integration tests for the operational endpoints, over a real socket.

mod common;

use common::test_config;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use summary_service::services::providers::mock::MockChatProvider;
use summary_service::services::providers::ProviderError;
use summary_service::startup::{AppState, Application};

/// Spawn the application on a random port and return the port number.
async fn spawn_app(provider: MockChatProvider) -> u16 {
    let state = AppState::new(test_config("http://127.0.0.1:1/v1"), Arc::new(provider));
    let app = Application::build_with_state(state)
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    port
}

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app(MockChatProvider::replying("unused")).await;
    let client = Client::new();

    let response = client
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().get("x-request-id").is_some());
    assert_eq!(response.headers().get("x-content-type-options").unwrap(), "nosniff");

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "summary-service");
}

#[tokio::test]
async fn readiness_reflects_provider_health() {
    let healthy = spawn_app(MockChatProvider::replying("unused")).await;
    let unhealthy = spawn_app(MockChatProvider::failing(ProviderError::NotConfigured(
        "no key".to_string(),
    )))
    .await;
    let client = Client::new();

    let response = client
        .get(format!("http://127.0.0.1:{}/ready", healthy))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let response = client
        .get(format!("http://127.0.0.1:{}/ready", unhealthy))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, serde_json::json!({"error": "Service unavailable"}));
}

#[tokio::test]
async fn metrics_without_recorder_is_not_found() {
    let port = spawn_app(MockChatProvider::replying("unused")).await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/metrics", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn summary_round_trip_over_socket() {
    let port = spawn_app(MockChatProvider::replying("**Summary:** stable")).await;

    let response = Client::new()
        .post(format!("http://127.0.0.1:{}/summary", port))
        .json(&serde_json::json!({ "messages": "Patient reports chest pain." }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["summary"], "**Summary:** stable");
}
