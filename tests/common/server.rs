//! Test server management.
//!
//! Spawns and manages presence-relay instances for integration testing.

use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

/// Knobs for the generated config file.
#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    /// `relay.move_policy`, e.g. `"upsert"`.
    pub move_policy: Option<&'static str>,
    pub allow_origins: Vec<&'static str>,
    /// Enable the HTTP sidecar, serving this directory when set.
    pub http: bool,
    pub assets_dir: Option<PathBuf>,
}

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    http_port: Option<u16>,
    _data_dir: TempDir,
}

/// Ask the OS for a port nobody is listening on.
fn free_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

impl TestServer {
    /// Spawn a relay with default settings.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(ServerOptions::default()).await
    }

    /// Spawn a relay with the given options.
    pub async fn spawn_with(options: ServerOptions) -> anyhow::Result<Self> {
        let data_dir = tempfile::tempdir()?;
        let port = free_port()?;

        let origins = options
            .allow_origins
            .iter()
            .map(|o| format!("{o:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut config = format!(
            r#"
[listen]
address = "127.0.0.1:{port}"
allow_origins = [{origins}]

[relay]
move_policy = "{policy}"
"#,
            policy = options.move_policy.unwrap_or("require-join"),
        );

        let http_port = if options.http {
            let http_port = free_port()?;
            config.push_str(&format!("\n[http]\naddress = \"127.0.0.1:{http_port}\"\n"));
            if let Some(dir) = &options.assets_dir {
                config.push_str(&format!("assets_dir = {:?}\n", dir.display().to_string()));
            }
            Some(http_port)
        } else {
            None
        };

        let config_path = data_dir.path().join("relay.toml");
        std::fs::write(&config_path, config)?;

        let child = Command::new(env!("CARGO_BIN_EXE_presence-relay"))
            .arg(&config_path)
            .env_remove("PORT")
            .env("RUST_LOG", "warn")
            .stdout(Stdio::null())
            .spawn()?;

        let server = Self {
            child,
            port,
            http_port,
            _data_dir: data_dir,
        };

        server.wait_until_ready(port).await?;
        if let Some(http_port) = http_port {
            server.wait_until_ready(http_port).await?;
        }

        Ok(server)
    }

    /// Wait until the server is accepting connections on `port`.
    async fn wait_until_ready(&self, port: u16) -> anyhow::Result<()> {
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", port)).await.is_ok() {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 5 seconds")
    }

    /// WebSocket address of the server.
    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Address of the HTTP sidecar, if enabled.
    pub fn http_address(&self) -> Option<String> {
        self.http_port.map(|port| format!("127.0.0.1:{port}"))
    }

    /// Connect a client and consume its initial `players` snapshot.
    pub async fn connect(&self) -> anyhow::Result<(super::client::TestClient, serde_json::Value)> {
        let mut client = super::client::TestClient::connect(&self.address()).await?;
        let snapshot = client.recv_json().await?;
        anyhow::ensure!(snapshot["type"] == "players", "first frame was {snapshot}");
        Ok((client, snapshot))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Kill the server process
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
