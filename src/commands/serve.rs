//! Serve command implementation.

use crate::api::start_server;
use crate::utils::config::ServerConfig;
use anyhow::{Context, Result};
use log::info;

/// Run the HTTP server on a fresh multi-threaded runtime until Ctrl-C
pub fn execute_serve(config: ServerConfig) -> Result<()> {
    info!("Starting HTTP service at {}", config.bind_addr());
    info!("Aggregation timeout: {:?}", config.agg_timeout);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build async runtime")?;

    runtime
        .block_on(start_server(config.clone()))
        .with_context(|| format!("HTTP listener failed at {}", config.bind_addr()))
}
