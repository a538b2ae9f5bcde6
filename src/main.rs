//! Action Gateway server binary.

use std::sync::Arc;

use tokio::net::TcpListener;

use action_gateway::api::build_router;
use action_gateway::config::Config;
use action_gateway::gateway::{ActionRegistry, ActionRouter, EnvSecretStore, UpstreamClient};
use action_gateway::{logging, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    // This is optional and won't fail if .env doesn't exist
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    logging::init();

    tracing::info!("Starting Action Gateway v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    // A bad registration is a deployment bug; refuse to start.
    let registry = ActionRegistry::from_config(&config.providers).map_err(|e| {
        tracing::error!(error = %e, "Invalid action registry");
        anyhow::anyhow!("Registry error: {}", e)
    })?;

    tracing::info!(actions = ?registry.names(), "Action registry built");

    let upstream = UpstreamClient::new(config.upstream.timeout_secs)?;

    // Secrets are read from the environment per request, so a key added
    // after startup is picked up without a restart.
    let router = ActionRouter::new(Arc::new(registry), Arc::new(EnvSecretStore), upstream);

    let state = AppState {
        router: Arc::new(router),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
