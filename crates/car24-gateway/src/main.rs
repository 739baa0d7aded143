use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use car24_client::BackendConfig;
use car24_core::TokenIssuer;
use car24_gateway::config::GatewayConfig;
use car24_gateway::routes;
use car24_gateway::state::AppState;

const DEFAULT_LOG_FILTER: &str = "car24_gateway=info,car24_client=info,car24_core=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = GatewayConfig::from_env()?;
    let backend_config = BackendConfig::from_env()?;
    let backends = car24_client::connect(&backend_config)?;

    let state = Arc::new(AppState::new(
        backends,
        TokenIssuer::new(&config.secret_key),
        config.require_auth,
    ));

    let app = routes::with_request_timeout(routes::router(state), config.request_timeout)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.http_port);
    tracing::info!(require_auth = config.require_auth, "Starting gateway on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
