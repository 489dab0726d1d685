//! Risedle API Server
//!
//! Run with: cargo run --bin risedle-api
//!
//! # Configuration
//!
//! Read from `RISEDLE_CONFIG`, `~/.config/risedle/config.toml` or
//! `./config.toml`, then overridden by environment variables:
//! - `RISEDLE_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `RISEDLE_API_PORT`: Port to listen on (default: 8083)
//! - `RISEDLE_REQUEST_TIMEOUT_MS`: Snapshot request timeout (default: 10000)
//! - `RISEDLE_LOG_LEVEL`, `RISEDLE_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Full filter, wins over `RISEDLE_LOG_LEVEL`

use risedle::api::{serve, AppState};
use risedle::config::Config;
use risedle::logging::init_logging;
use risedle::snapshot::SnapshotClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config lookup logs nothing until the subscriber is installed
    let config = Config::load_default();
    init_logging(&config.logging);

    tracing::info!("Starting Risedle API server v{}", env!("CARGO_PKG_VERSION"));

    let client = SnapshotClient::new(config.snapshot.client_config())?;
    for chain in &config.snapshot.chains {
        tracing::info!(chain_id = chain.id, endpoint = %chain.endpoint, "Snapshot endpoint: {}", chain.name);
    }

    let state = AppState::new(Arc::new(client), config.api.clone());

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("Risedle API server stopped");
    Ok(())
}
