#![cfg(not(tarpaulin_include))]

use sheet_gallery::app;
use sheet_gallery::config::Config;
use std::env;

/// Main entry point for the gallery web server
///
/// Initializes logging (`RUST_LOG`, default `info`) and serves the gallery.
///
/// # Arguments
/// * Optional first positional argument: the bind address, e.g. `0.0.0.0:8080`
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config = Config::from_args(&args);

    log::info!("Starting gallery server on {}", config.bind_addr);
    app::run(config).await
}
