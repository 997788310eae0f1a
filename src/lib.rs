//! presence-relay - real-time presence and state relay.
//!
//! Participants connect over WebSocket, announce themselves, and the relay
//! keeps a shared directory of who is present and where, fanning every
//! change out to the other connections.

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod metrics;
pub mod network;
pub mod state;

#[cfg(test)]
mod test_support;
