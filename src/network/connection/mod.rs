//! Connection - Handles an individual participant connection.
//!
//! Each Connection runs in its own Tokio task:
//!
//! ```text
//!    ┌──────────────────────────────────────────────┐
//!    │              Connection Task                 │
//!    │                                              │
//!    │  WebSocket read ──▶ decode ──▶ dispatch      │
//!    │                                  │ (hub lock)│
//!    │                                  ▼           │
//!    │  WebSocket write ◀── outgoing queue ◀── hub  │
//!    └──────────────────────────────────────────────┘
//! ```
//!
//! The task registers with the hub before reading anything and unregisters
//! exactly once when the loop ends, whatever ended it.

mod error_handling;

use error_handling::{FrameAction, classify_frame};

use crate::handlers::dispatch;
use crate::metrics;
use crate::state::{Frame, Hub};
use futures_util::{SinkExt, StreamExt};
use relay_proto::PlayerId;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info, instrument, warn};

/// A participant connection handler.
pub struct Connection {
    id: PlayerId,
    addr: SocketAddr,
    hub: Arc<Hub>,
    stream: WebSocketStream<TcpStream>,
    outgoing: mpsc::UnboundedReceiver<Frame>,
}

impl Connection {
    /// Wrap a connection that has already been registered with the hub.
    pub fn new(
        id: PlayerId,
        addr: SocketAddr,
        hub: Arc<Hub>,
        stream: WebSocketStream<TcpStream>,
        outgoing: mpsc::UnboundedReceiver<Frame>,
    ) -> Self {
        Self {
            id,
            addr,
            hub,
            stream,
            outgoing,
        }
    }

    /// Run the connection until the peer leaves or the transport fails.
    #[instrument(skip(self), fields(id = %self.id, addr = %self.addr), name = "connection")]
    pub async fn run(mut self) {
        self.event_loop().await;

        if let Some(player) = self.hub.disconnect(self.id) {
            info!(username = %player.username, "Player left");
        }
        // Flushes the close reply if the peer started the closing handshake.
        let _ = self.stream.close(None).await;
    }

    async fn event_loop(&mut self) {
        loop {
            tokio::select! {
                incoming = self.stream.next() => {
                    match classify_frame(incoming) {
                        FrameAction::Envelope(text) => self.handle_envelope(&text),
                        FrameAction::Ignore => {}
                        FrameAction::Drop { reason } => {
                            debug!(reason, "Dropping frame");
                            metrics::record_dropped(reason);
                        }
                        FrameAction::Closed => {
                            debug!("Peer closed connection");
                            break;
                        }
                        FrameAction::Failed { error_msg } => {
                            warn!(error = %error_msg, "Read error");
                            break;
                        }
                    }
                }
                frame = self.outgoing.recv() => {
                    let Some(frame) = frame else {
                        break;
                    };
                    if let Err(e) = self.stream.send(WsMessage::Text(frame.to_string())).await {
                        warn!(error = %e, "Write error");
                        break;
                    }
                }
            }
        }
    }

    /// Decode and apply one inbound envelope. Never closes the connection.
    fn handle_envelope(&self, text: &str) {
        let msg = match relay_proto::decode(text) {
            Ok(msg) => msg,
            Err(e) => {
                debug!(error = %e, "Dropping undecodable envelope");
                metrics::record_dropped(e.error_code());
                return;
            }
        };

        if let Err(e) = dispatch(&self.hub, self.id, msg) {
            warn!(error = %e, "Handler error");
            metrics::record_dropped(e.error_code());
        }
    }
}
