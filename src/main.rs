use reqwest::Client;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::booter::Booter;
use crate::core::staging::ensure_upload_dir;
use crate::server::router;
use crate::server::types::{AppState, Config};

pub mod booter;
pub mod core;
pub mod server;
pub mod utils;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing for logging
    init_tracing();

    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    ensure_upload_dir(&config.upload_dir).await?;

    // One HTTP client shared by every request
    let http_client = Client::new();
    let state = Arc::new(AppState::new(&config, http_client));

    let booter = Booter::new(config.port).await?;
    tracing::info!("Server is running on {}", booter.addr);

    booter.start(router(state)).await
}
