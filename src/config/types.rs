//! Core configuration types and loading.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::listen::ListenConfig;

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "relay.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid PORT value: {0:?}")]
    InvalidPort(String),
}

/// Relay configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// WebSocket listener.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Dispatch behaviour.
    #[serde(default)]
    pub relay: RelayConfig,
    /// Optional HTTP sidecar (static assets and metrics).
    pub http: Option<HttpConfig>,
    /// Log output.
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the startup configuration.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_PATH`] is
    /// read if present and built-in defaults are used otherwise.
    pub fn resolve(explicit: Option<&str>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    /// Apply a `PORT` environment override to the listen address.
    ///
    /// Only the WebSocket listener moves; `http.address` is left alone, so
    /// static assets stay on their own port.
    pub fn with_port_override(mut self, port: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(raw) = port {
            let port = raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.to_string()))?;
            self.listen.address.set_port(port);
        }
        Ok(self)
    }
}

/// Whether a `move` may create a directory record.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MovePolicy {
    /// `join` is the only way to create a record; `move` without one is ignored.
    #[default]
    RequireJoin,
    /// The first `move` from an unknown sender creates a guest record.
    Upsert,
}

/// Dispatch behaviour.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Record creation policy for `move`.
    pub move_policy: MovePolicy,
}

/// HTTP sidecar configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Address to bind to (e.g., "0.0.0.0:8080").
    pub address: SocketAddr,
    /// Directory of static client assets. Omit to serve no files.
    pub assets_dir: Option<PathBuf>,
    /// Serve Prometheus metrics on `/metrics`.
    #[serde(default = "default_true")]
    pub metrics: bool,
}

fn default_true() -> bool {
    true
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Log output configuration. Filtering is controlled by `RUST_LOG`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
}
