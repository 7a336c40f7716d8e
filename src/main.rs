use std::env;
use std::path::PathBuf;

use anyhow::anyhow;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ssml_gateway::{ServerConfig, create_app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let mut config_path: Option<PathBuf> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow!("{arg} requires a file path"))?;
                config_path = Some(PathBuf::from(path));
            }
            other => {
                anyhow::bail!("Unknown argument '{other}'. Usage: ssml-gateway [--config <file>]");
            }
        }
    }

    // Load configuration
    let config = match &config_path {
        Some(path) => ServerConfig::from_file(path),
        None => ServerConfig::from_env(),
    }
    .map_err(|e| anyhow!(e.to_string()))?;

    // Initialize tracing: RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| anyhow!("Invalid log level '{}': {e}", config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let address = config.address();
    let cleanup_interval = config.rate_limit_cleanup_interval();
    tracing::info!(
        address = %address,
        auth = config.has_auth_token(),
        upstream = config.has_upstream(),
        "Starting server"
    );

    // Create application state and start the limiter sweeps
    let app_state = AppState::new(config);
    let sweepers = app_state.core_state.spawn_maintenance(cleanup_interval);

    let app = create_app(app_state);

    // Create listener
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Server listening on {address}");

    // Start server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    for sweeper in sweepers {
        sweeper.abort();
    }
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
