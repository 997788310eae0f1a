//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions and loading (Config, RelayConfig, HttpConfig, LogConfig)
//! - [`listen`]: WebSocket listener configuration (ListenConfig)
//! - [`validation`]: Startup checks for inconsistent settings

mod listen;
mod types;
mod validation;

pub use listen::ListenConfig;
pub use types::{
    Config, ConfigError, DEFAULT_CONFIG_PATH, HttpConfig, LogConfig, LogFormat, MovePolicy,
    RelayConfig,
};
pub use validation::{ValidationError, validate};
