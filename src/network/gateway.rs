//! Gateway - WebSocket listener that accepts incoming connections.
//!
//! The Gateway binds the listen socket, performs the WebSocket handshake
//! (including the Origin check) and spawns a Connection task for each
//! accepted participant.

use crate::config::ListenConfig;
use crate::network::Connection;
use crate::state::Hub;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::accept_hdr_async_with_config;
use tokio_tungstenite::tungstenite::handshake::server::ErrorResponse;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tracing::{error, info, instrument, warn};

/// The Gateway accepts incoming WebSocket connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    config: Arc<ListenConfig>,
    hub: Arc<Hub>,
}

impl Gateway {
    /// Bind the gateway to the configured address.
    pub async fn bind(config: ListenConfig, hub: Arc<Hub>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(config.address).await?;
        info!(address = %config.address, "WebSocket listener bound");
        Ok(Self {
            listener,
            config: Arc::new(config),
            hub,
        })
    }

    /// Address actually bound (differs from the configured one for port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the accept loop.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        warn!(%addr, error = %e, "Failed to set TCP_NODELAY");
                    }
                    let config = Arc::clone(&self.config);
                    let hub = Arc::clone(&self.hub);
                    tokio::spawn(async move {
                        handle_client(stream, addr, config, hub).await;
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}

/// Handshake, register and run one client.
async fn handle_client(stream: TcpStream, addr: SocketAddr, config: Arc<ListenConfig>, hub: Arc<Hub>) {
    let origin_check = |req: &http::Request<()>, response: http::Response<()>| {
        let origin = req.headers().get("Origin").and_then(|o| o.to_str().ok());
        if config.origin_allowed(origin) {
            return Ok(response);
        }
        warn!(%addr, origin = origin.unwrap_or("<none>"), "WebSocket origin rejected");
        let mut rejection = ErrorResponse::new(Some("Origin not allowed".to_string()));
        *rejection.status_mut() = http::StatusCode::FORBIDDEN;
        Err(rejection)
    };

    let ws_stream = match accept_hdr_async_with_config(stream, origin_check, Some(ws_config(&config))).await {
        Ok(ws_stream) => ws_stream,
        Err(e) => {
            warn!(%addr, error = %e, "WebSocket handshake failed");
            return;
        }
    };

    let (id, outgoing) = match hub.connect(addr) {
        Ok(registered) => registered,
        Err(e) => {
            error!(%addr, error = %e, "Failed to register connection");
            return;
        }
    };

    Connection::new(id, addr, hub, ws_stream, outgoing).run().await;
    info!(%id, %addr, "WebSocket connection closed");
}

fn ws_config(config: &ListenConfig) -> WebSocketConfig {
    let mut ws = WebSocketConfig::default();
    ws.max_message_size = Some(config.max_message_size);
    ws.max_frame_size = Some(config.max_message_size);
    ws
}
