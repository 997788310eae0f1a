//! presence-relay - real-time presence and state relay.
//!
//! Usage: `presence-relay [config.toml]`. The `PORT` environment variable
//! overrides the WebSocket listen port only. Static assets and `/metrics`
//! are served on a second port, `http.address`, when `[http]` is configured.

use presence_relay::config::{Config, LogFormat, validate};
use presence_relay::network::Gateway;
use presence_relay::state::Hub;
use presence_relay::{http, metrics};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::args().nth(1);
    let port_override = std::env::var("PORT").ok();
    let config = Config::resolve(config_path.as_deref())?.with_port_override(port_override.as_deref())?;

    // Initialize tracing
    init_tracing(config.log.format);

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s)", errors.len());
    }

    info!(
        address = %config.listen.address,
        move_policy = ?config.relay.move_policy,
        "Starting presence-relay"
    );

    // HTTP sidecar is optional.
    if let Some(http_config) = config.http.clone() {
        if http_config.metrics {
            metrics::init();
            info!("Prometheus metrics initialized");
        }
        tokio::spawn(async move {
            http::run_http_server(http_config).await;
        });
    }

    let hub = Arc::new(Hub::new(config.relay.move_policy));
    let gateway = Gateway::bind(config.listen, hub).await?;

    tokio::select! {
        result = gateway.run() => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown requested"),
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }
}
