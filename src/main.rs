//! HTTP server for the timekeeping engine.
//!
//! Environment:
//! - `TIMEKEEPING_CONFIG`: path to the rules file (default `./config/working_time.yaml`)
//! - `TIMEKEEPING_ADDR`: bind address (default `0.0.0.0:3000`)
//! - `RUST_LOG`: log filter (default `info`)

use std::env;

use timekeeping_engine::api::{AppState, create_router};
use timekeeping_engine::config::ConfigLoader;
use timekeeping_engine::error::EngineError;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "./config/working_time.yaml";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config_path =
        env::var("TIMEKEEPING_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match ConfigLoader::load(&config_path) {
        Ok(config) => config,
        Err(EngineError::ConfigNotFound { path }) => {
            warn!(path = %path, "Rules file not found, using statutory defaults");
            ConfigLoader::default()
        }
        Err(err) => {
            error!(error = %err, "Configuration error");
            std::process::exit(1);
        }
    };

    let addr = env::var("TIMEKEEPING_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, version = env!("CARGO_PKG_VERSION"), "Timekeeping engine listening");

    axum::serve(listener, create_router(AppState::new(config))).await
}
