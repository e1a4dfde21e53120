//! Server configuration from the environment.

use std::net::{AddrParseError, SocketAddr};
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the network definition file.
pub const NETWORK_PATH_VAR: &str = "METRO_NETWORK_PATH";

/// Environment variable with the address to listen on.
pub const BIND_ADDR_VAR: &str = "METRO_BIND_ADDR";

/// Environment variable with the periodic reload interval in seconds.
pub const RELOAD_INTERVAL_VAR: &str = "METRO_RELOAD_INTERVAL_SECS";

/// Errors from reading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid METRO_BIND_ADDR {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("invalid METRO_RELOAD_INTERVAL_SECS {value:?}: {source}")]
    InvalidReloadInterval {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Network definition file to load at startup and on reload.
    pub network_path: PathBuf,

    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// How often to re-read the network definition file.
    /// `None` disables periodic reloading.
    pub reload_interval: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            network_path: PathBuf::from("data/network.json"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            reload_interval: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables, using
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, using defaults for anything
    /// it returns `None` for.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(NETWORK_PATH_VAR) {
            config.network_path = PathBuf::from(path);
        }

        if let Some(value) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = value
                .parse()
                .map_err(|source| ConfigError::InvalidBindAddr { value, source })?;
        }

        if let Some(value) = lookup(RELOAD_INTERVAL_VAR) {
            let secs: u64 = value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidReloadInterval { value, source })?;
            config.reload_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }
}
