#![cfg(not(tarpaulin_include))]

use algoviz::app;
use algoviz::config::ServerConfig;
use std::env;

/// Main entry point for the web application
///
/// Reads the `ALGOVIZ_*` environment variables, lets an optional positional
/// port argument override them, and serves the API until the process is
/// stopped. Log verbosity follows `RUST_LOG` (default `info`).
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?.with_args(env::args().skip(1))?;
    log::info!(
        "Starting visualizer backend (max {} elements, {} operations, static files from {})",
        config.max_elements,
        config.max_operations,
        config.static_dir.display()
    );

    app::run(config).await
}
