//! Integration test common infrastructure.
//!
//! Provides utilities for spawning relay processes, creating WebSocket
//! test clients, and asserting on envelope flows.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use server::{ServerOptions, TestServer};
