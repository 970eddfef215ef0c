use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

mod analysis;
mod config;
mod data;
mod util;
mod web;

use crate::config::{AppConfig, CliArgs};
use crate::data::Dataset;
use crate::util::logging::init_tracing;
use crate::web::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let args = CliArgs::parse();

    // Load configuration
    let config = match AppConfig::new(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Load the dataset. A load failure is fatal: the service must not
    // start serving without its table.
    info!("Loading dataset from {}", config.dataset.path);
    let dataset = match Dataset::load(Path::new(&config.dataset.path)) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Failed to load dataset from {}: {}", config.dataset.path, e);
            return Err(e.into());
        }
    };
    info!("Loaded {} passenger records", dataset.len());

    // Create application state
    let app_state = Arc::new(AppState::new(config.clone(), dataset));

    // Start the web server
    info!(
        "Starting titanic-chat server on {}:{}",
        config.web.host, config.web.port
    );
    match web::run_server(config.web, app_state).await {
        Ok(_) => info!("Server stopped gracefully"),
        Err(e) => {
            error!("Server error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
