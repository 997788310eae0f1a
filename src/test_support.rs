//! Helpers shared by unit tests.

use relay_proto::{ClientMessage, Position};
use serde_json::Value;
use std::net::{Ipv4Addr, SocketAddr};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::state::Frame;

pub(crate) fn addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, 40000))
}

/// Pull every queued frame and parse it as JSON.
pub(crate) fn drain(rx: &mut UnboundedReceiver<Frame>) -> Vec<Value> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(serde_json::from_str(&frame).expect("outbound frame is JSON"));
    }
    frames
}

pub(crate) fn join_msg(username: &str) -> ClientMessage {
    ClientMessage::Join {
        username: username.to_string(),
        color: None,
        position: Some(Position::default()),
    }
}
