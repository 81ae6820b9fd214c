//! HTTP entry point for the coupler MCP gateway.

mod config;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use coupler_bus::{AdapterConfig, CapabilityBus, ProtocolAdapter};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let mut bus = CapabilityBus::with_default_capabilities()
        .context("failed to build the capability registry")?;
    if let Some(budget) = config.request_timeout {
        bus = bus.with_call_timeout(budget);
    }

    let adapter = ProtocolAdapter::with_config(
        Arc::new(bus),
        AdapterConfig {
            method_separator: config.method_separator,
            ..AdapterConfig::default()
        },
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "coupler gateway listening");

    axum::serve(listener, routes::router(Arc::new(adapter))).await?;
    Ok(())
}
