use crate::error::AppError;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the process-wide Prometheus recorder.
///
/// Only one recorder can exist per process; call once from `main`.
pub fn install_metrics_recorder() -> Result<PrometheusHandle, AppError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("metrics recorder: {}", e)))
}

/// Render the current metric families in Prometheus text format.
pub fn render_metrics(handle: &PrometheusHandle) -> String {
    handle.render()
}
