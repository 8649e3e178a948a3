use dotenvy::dotenv;
use service_core::observability::{init_tracing, install_metrics_recorder};
use summary_service::config::SummaryConfig;
use summary_service::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Configuration must be complete before anything is bound.
    let config = SummaryConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "summary-service",
        "info",
        config.observability.otlp_endpoint.as_deref(),
    );

    let metrics_handle = match install_metrics_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!("Metrics disabled: {}", e);
            None
        }
    };

    let app = Application::build(config, metrics_handle)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build application: {}", e))?;

    app.run_until_stopped().await?;

    Ok(())
}
