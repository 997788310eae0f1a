//! Test WebSocket client.
//!
//! Provides a participant client for integration testing that can send
//! envelopes and assert on received ones.

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// A test participant.
pub struct TestClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str) -> anyhow::Result<Self> {
        let (ws, _) = connect_async(format!("ws://{address}/")).await?;
        Ok(Self { ws })
    }

    /// Connect sending an `Origin` header. Handshake errors are returned as-is.
    pub async fn connect_with_origin(address: &str, origin: &str) -> Result<Self, WsError> {
        let mut request = format!("ws://{address}/").into_client_request()?;
        let origin = http::HeaderValue::from_str(origin).map_err(|e| WsError::HttpFormat(e.into()))?;
        request.headers_mut().insert("Origin", origin);
        let (ws, _) = connect_async(request).await?;
        Ok(Self { ws })
    }

    /// Send a raw text frame.
    pub async fn send_raw(&mut self, text: &str) -> anyhow::Result<()> {
        self.ws.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Send a binary frame.
    pub async fn send_binary(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.ws.send(Message::Binary(bytes.to_vec())).await?;
        Ok(())
    }

    /// Send a JSON envelope.
    pub async fn send_json(&mut self, value: Value) -> anyhow::Result<()> {
        self.send_raw(&value.to_string()).await
    }

    /// Receive a single envelope from the server.
    pub async fn recv_json(&mut self) -> anyhow::Result<Value> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive an envelope with a timeout, skipping control frames.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Value> {
        loop {
            let frame = timeout(dur, self.ws.next())
                .await?
                .ok_or_else(|| anyhow::anyhow!("connection closed"))??;
            match frame {
                Message::Text(text) => return Ok(serde_json::from_str(&text)?),
                Message::Close(_) => anyhow::bail!("connection closed"),
                _ => continue,
            }
        }
    }

    /// Receive envelopes until one has the given `type`, returning it.
    pub async fn recv_type(&mut self, kind: &str) -> anyhow::Result<Value> {
        loop {
            let value = self.recv_json().await?;
            if value["type"] == kind {
                return Ok(value);
            }
        }
    }

    /// Assert nothing arrives within `dur`.
    pub async fn expect_silence(&mut self, dur: Duration) {
        if let Ok(value) = self.recv_timeout(dur).await {
            panic!("expected no envelope, got {value}");
        }
    }

    /// Join the directory.
    pub async fn join(&mut self, username: &str) -> anyhow::Result<()> {
        self.send_json(serde_json::json!({
            "type": "join",
            "username": username,
            "color": 0x3366ff,
            "position": { "x": 0, "y": 1, "z": 0 },
        }))
        .await
    }

    /// Round-trip a chat so every earlier envelope from this client has been
    /// applied. Every connected peer also receives the chat.
    pub async fn sync(&mut self) -> anyhow::Result<()> {
        self.send_json(serde_json::json!({ "type": "chat", "message": "sync" }))
            .await?;
        self.recv_type("chat").await?;
        Ok(())
    }

    /// Close the connection with a proper closing handshake.
    pub async fn close(mut self) -> anyhow::Result<()> {
        self.ws.close(None).await?;
        Ok(())
    }
}
