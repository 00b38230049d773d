//! platereg issuer.
//!
//! The issuer hands out vehicle registration plates, either sequentially or
//! at random, and guarantees no plate is ever issued twice. Issued plates
//! are durably recorded in a local SQLite database and reloaded on startup.

use anyhow::Result;
use platereg_issuer::{
    api, config, engine::AllocationEngine, state::AppState, store::PlateStore,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize tracing (prefer RUST_LOG, fallback to PLATEREG_LOG_LEVEL)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting platereg issuer");
    info!(listen_addr = %config.listen_addr, region = %config.default_region, "Configuration loaded");

    // Open the plate store
    let store = match PlateStore::open(&config.state_db_path) {
        Ok(store) => {
            info!(path = %config.state_db_path.display(), "Plate store opened");
            store
        }
        Err(e) => {
            error!(error = %e, "Failed to open plate store");
            return Err(e.into());
        }
    };

    // Bulk-load issued plates into the allocation engine
    let engine = match AllocationEngine::new(store, config.default_region.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            error!(error = %e, "Failed to load issued plates");
            return Err(e.into());
        }
    };

    // Create application state
    let state = AppState::new(engine);

    // Build and run the server
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received shutdown signal");
        })
        .await?;

    info!("Issuer shutdown complete");
    Ok(())
}
