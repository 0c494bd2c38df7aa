use agrohub::router::init_router;
use agrohub::state::init_app_state;
use agrohub_config::{CorsConfig, DatabaseConfig, ServerConfig};
use agrohub_observability::{init_metrics, init_tracing};
use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let metrics = init_metrics()?;
    let state = init_app_state(&DatabaseConfig::from_env(), CorsConfig::from_env(), metrics)?;
    let app = init_router(state);

    let server = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", server.bind_address()))?;

    info!(address = %server.bind_address(), "🚀 Server running");
    info!("📚 Swagger UI available at http://localhost:{}/swagger-ui", server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
