use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use eduextra::eduextra_config::ServerConfig;
use eduextra::logging::init_tracing;
use eduextra::metrics::{init_metrics, metrics_app};
use eduextra::router::init_router;
use eduextra::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _log_guard = init_tracing();

    let server_config = ServerConfig::from_env();
    let state = init_app_state().await?;

    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
        info!("Prometheus metrics exposed at /metrics");
    }

    let address = server_config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!(address = %address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
