use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

use crate::startup::AppState;

/// Liveness probe; does not touch the upstream provider.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "summary-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe; 503 while the provider cannot serve completions.
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.chat_provider.health_check().await.map_err(|e| {
        tracing::warn!(error = %e, "Chat provider health check failed");
        AppError::ServiceUnavailable
    })?;

    Ok(StatusCode::OK)
}
