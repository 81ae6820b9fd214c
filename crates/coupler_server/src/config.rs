//! Environment-driven server configuration.
//!
//! - `COUPLER_BIND_ADDR` - socket address to serve on (default `0.0.0.0:8000`)
//! - `COUPLER_REQUEST_TIMEOUT_SECS` - per-dispatch wall-clock budget
//!   (unset means no budget)
//! - `COUPLER_METHOD_SEPARATOR` - single character splitting JSON-RPC
//!   method names into capability/action (default `.`)

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub request_timeout: Option<Duration>,
    pub method_separator: char,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            request_timeout: None,
            method_separator: '.',
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("COUPLER_BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("invalid COUPLER_BIND_ADDR: {addr}"))?;
        }

        if let Ok(secs) = std::env::var("COUPLER_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("invalid COUPLER_REQUEST_TIMEOUT_SECS: {secs}"))?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        if let Ok(sep) = std::env::var("COUPLER_METHOD_SEPARATOR") {
            let mut chars = sep.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => config.method_separator = c,
                _ => bail!("COUPLER_METHOD_SEPARATOR must be a single character, got {sep:?}"),
            }
        }

        Ok(config)
    }
}
