//! Client settings, loadable from JSON. Missing fields take their defaults.

use std::{fs, path::Path, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// The contents were not valid configuration JSON
    #[error(transparent)]
    SerdeJSONError(#[from] serde_json::Error),

    /// `request_timeout_secs` was 0, which would fail every node call
    #[error("request_timeout_secs must be at least 1")]
    ZeroTimeout,
}

fn default_node_uri() -> String {
    "http://127.0.0.1:9650".to_owned()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_cache_size() -> usize {
    camino_provider::DEFAULT_CACHE_SIZE.get()
}

/// Where the node lives and how the client behaves
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the node, without an API path
    pub node_uri: String,
    /// Seconds to wait for each node call. Must be at least 1.
    pub request_timeout_secs: u64,
    /// Default `tracing` filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Fetched transactions to keep in memory
    pub cache_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            node_uri: default_node_uri(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
            cache_size: default_cache_size(),
        }
    }
}

impl ClientConfig {
    /// Read a JSON configuration file. A zero request timeout is rejected.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        fs::read_to_string(path)?.parse()
    }

    /// The per-call timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl FromStr for ClientConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: ClientConfig = serde_json::from_str(s)?;
        if config.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_fills_in_defaults() {
        let config: ClientConfig = r#"{"node_uri": "https://kopernikus.camino.network"}"#
            .parse()
            .unwrap();
        assert_eq!(config.node_uri, "https://kopernikus.camino.network");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cache_size, 64);

        let empty: ClientConfig = "{}".parse().unwrap();
        assert_eq!(empty, ClientConfig::default());
    }

    #[test]
    fn it_loads_files() {
        let path = std::env::temp_dir().join(format!("camino-client-{}.json", std::process::id()));
        fs::write(&path, r#"{"request_timeout_secs": 5, "log_level": "debug"}"#).unwrap();
        let config = ClientConfig::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.log_level, "debug");

        assert!(matches!(
            ClientConfig::from_file(&path),
            Err(ConfigError::IOError(_))
        ));
        assert!(matches!(
            "{".parse::<ClientConfig>(),
            Err(ConfigError::SerdeJSONError(_))
        ));
    }

    #[test]
    fn it_rejects_zero_timeouts() {
        assert!(matches!(
            r#"{"request_timeout_secs": 0}"#.parse::<ClientConfig>(),
            Err(ConfigError::ZeroTimeout)
        ));
        let config: ClientConfig = r#"{"request_timeout_secs": 1}"#.parse().unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
