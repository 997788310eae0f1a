//! Classification of inbound WebSocket frames and read errors.

use tokio_tungstenite::tungstenite::Error as WsError;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::tungstenite::error::ProtocolError;

/// What the read loop should do with the next item from the socket.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum FrameAction {
    /// A text payload to decode as an envelope.
    Envelope(String),
    /// Control traffic the library already answered.
    Ignore,
    /// A frame that cannot carry an envelope; dropped, connection stays open.
    Drop { reason: &'static str },
    /// The peer went away. Normal close path.
    Closed,
    /// Transport failure. Close the connection and log why.
    Failed { error_msg: String },
}

/// Classify one item read from the WebSocket stream.
pub(super) fn classify_frame(item: Option<Result<WsMessage, WsError>>) -> FrameAction {
    match item {
        None => FrameAction::Closed,
        Some(Ok(WsMessage::Text(text))) => FrameAction::Envelope(text),
        Some(Ok(WsMessage::Binary(bytes))) => match String::from_utf8(bytes) {
            Ok(text) => FrameAction::Envelope(text),
            Err(_) => FrameAction::Drop {
                reason: "invalid_utf8",
            },
        },
        Some(Ok(WsMessage::Close(_))) => FrameAction::Closed,
        Some(Ok(WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_))) => FrameAction::Ignore,
        Some(Err(e)) => classify_read_error(&e),
    }
}

/// Classify a transport read error.
fn classify_read_error(e: &WsError) -> FrameAction {
    match e {
        WsError::ConnectionClosed | WsError::AlreadyClosed => FrameAction::Closed,
        WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake) => FrameAction::Closed,
        WsError::Io(io) if is_disconnect(io.kind()) => FrameAction::Closed,
        WsError::Capacity(cap) => FrameAction::Failed {
            error_msg: format!("Frame too large: {cap}"),
        },
        _ => FrameAction::Failed {
            error_msg: e.to_string(),
        },
    }
}

fn is_disconnect(kind: std::io::ErrorKind) -> bool {
    use std::io::ErrorKind;
    matches!(
        kind,
        ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted | ErrorKind::BrokenPipe | ErrorKind::UnexpectedEof
    )
}
