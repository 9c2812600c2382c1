//! Main entry point for the wallet-scope HTTP service

use anyhow::Result;
use tracing::{info, warn, Level};
use wallet_scope::config::ServiceConfig;
use wallet_scope::scoring::EngineBuilder;
use wallet_scope::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = ServiceConfig::from_env();

    if config.has_credential() {
        info!("Helius API key loaded successfully.");
    } else {
        warn!("No Helius API key found! Set HELIUS_API_KEY; scoring requests will fail until it is configured.");
    }

    let engine = EngineBuilder::new().with_config(&config).build();

    server::serve(&config, engine).await
}
