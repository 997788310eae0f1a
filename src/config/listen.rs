//! WebSocket listener configuration.

use serde::Deserialize;
use std::net::SocketAddr;

/// Port the relay listens on when neither the config file nor `PORT` set one.
pub(super) const DEFAULT_PORT: u16 = 3000;

/// Largest inbound WebSocket message accepted, in bytes.
const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// WebSocket listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "0.0.0.0:3000").
    pub address: SocketAddr,
    /// Allowed origins for the WebSocket handshake (e.g., `["https://example.com"]`).
    /// Empty list allows all origins.
    pub allow_origins: Vec<String>,
    /// Maximum size of one inbound message (and frame), in bytes.
    pub max_message_size: usize,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            allow_origins: Vec::new(),
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

impl ListenConfig {
    /// Whether a handshake carrying `origin` may proceed.
    ///
    /// An empty allow-list or a `*` entry admits everyone, including clients
    /// that send no Origin header at all.
    pub fn origin_allowed(&self, origin: Option<&str>) -> bool {
        if self.allow_origins.is_empty() || self.allow_origins.iter().any(|a| a == "*") {
            return true;
        }
        origin.is_some_and(|o| self.allow_origins.iter().any(|a| a == o))
    }
}
