//! Environment-driven server configuration.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};

use prodplan_observability::LogFormat;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl ApiConfig {
    /// Read `PRODPLAN_BIND_ADDR`, `PORT` and `PRODPLAN_LOG_FORMAT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let ip: IpAddr = lookup("PRODPLAN_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("PRODPLAN_BIND_ADDR must be an IP address")?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got `{raw}`"))?,
            None => DEFAULT_PORT,
        };

        let log_format = match lookup("PRODPLAN_LOG_FORMAT") {
            Some(raw) => raw.parse().context("invalid PRODPLAN_LOG_FORMAT")?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr: SocketAddr::new(ip, port),
            log_format,
        })
    }
}
