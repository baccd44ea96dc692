//! Tracing setup for processes hosting the adapter.

use anyhow::{anyhow, Result};
use std::io;

/// Install a stderr fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Stdout is left alone because framework transports often own it. Fails if a
/// global subscriber is already installed.
pub fn init_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))?;

    tracing::info!(
        "pfcosim-adapter v{} ready",
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}
