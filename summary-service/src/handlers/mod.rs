//! HTTP handlers for the summary service.

pub mod health;
pub mod metrics;
pub mod summary;

use axum::response::IntoResponse;
use service_core::error::AppError;

pub use health::{health_check, readiness_check};
pub use summary::generate_summary;

pub async fn not_found() -> impl IntoResponse {
    AppError::NotFound(anyhow::anyhow!("Not found"))
}
