//! Prometheus metrics collection for the relay.
//!
//! Metrics are inert until [`init`] runs; every recording helper checks the
//! `OnceLock` first, so tests and deployments without the HTTP sidecar pay
//! only an atomic load.
//!
//! - `relay_connections_total` - WebSocket handshakes completed
//! - `relay_connected_peers` - Currently open connections
//! - `relay_active_players` - Directory size
//! - `relay_envelopes_received_total{kind}` - Decoded inbound envelopes
//! - `relay_envelopes_dropped_total{reason}` - Inbound frames discarded
//! - `relay_frames_sent_total` - Outbound frames queued to connections
//! - `relay_message_fanout` - Recipients per outbound envelope

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters
// ========================================================================

/// WebSocket handshakes completed.
pub static CONNECTIONS_ACCEPTED: OnceLock<IntCounter> = OnceLock::new();

/// Inbound envelopes decoded, by kind.
pub static ENVELOPES_RECEIVED: OnceLock<IntCounterVec> = OnceLock::new();

/// Inbound frames dropped, by reason.
pub static ENVELOPES_DROPPED: OnceLock<IntCounterVec> = OnceLock::new();

/// Outbound frames queued to connections.
pub static FRAMES_SENT: OnceLock<IntCounter> = OnceLock::new();

// ========================================================================
// Gauges
// ========================================================================

/// Currently open connections.
pub static CONNECTED_PEERS: OnceLock<IntGauge> = OnceLock::new();

/// Participants with a directory record.
pub static ACTIVE_PLAYERS: OnceLock<IntGauge> = OnceLock::new();

// ========================================================================
// Histograms
// ========================================================================

/// Recipients reached per outbound envelope.
pub static MESSAGE_FANOUT: OnceLock<Histogram> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Called once at startup when the HTTP sidecar exposes `/metrics`.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            let m = $init.expect(concat!(stringify!($metric), " creation failed"));
            if let Err(e) = r.register(Box::new(m.clone())) {
                tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
            }
            let _ = $metric.set(m);
        };
    }

    register!(CONNECTIONS_ACCEPTED, IntCounter::new("relay_connections_total", "WebSocket handshakes completed"));
    register!(ENVELOPES_RECEIVED, IntCounterVec::new(Opts::new("relay_envelopes_received_total", "Inbound envelopes decoded by kind"), &["kind"]));
    register!(ENVELOPES_DROPPED, IntCounterVec::new(Opts::new("relay_envelopes_dropped_total", "Inbound frames dropped by reason"), &["reason"]));
    register!(FRAMES_SENT, IntCounter::new("relay_frames_sent_total", "Outbound frames queued to connections"));
    register!(CONNECTED_PEERS, IntGauge::new("relay_connected_peers", "Currently open connections"));
    register!(ACTIVE_PLAYERS, IntGauge::new("relay_active_players", "Participants with a directory record"));
    register!(MESSAGE_FANOUT, Histogram::with_opts(
        HistogramOpts::new("relay_message_fanout", "Recipients per outbound envelope")
            .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0])));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Recording helpers
// ============================================================================

#[inline]
pub fn record_connection_opened() {
    if let Some(c) = CONNECTIONS_ACCEPTED.get() {
        c.inc();
    }
    if let Some(g) = CONNECTED_PEERS.get() {
        g.inc();
    }
}

#[inline]
pub fn record_connection_closed() {
    if let Some(g) = CONNECTED_PEERS.get() {
        g.dec();
    }
}

#[inline]
pub fn set_active_players(count: usize) {
    if let Some(g) = ACTIVE_PLAYERS.get() {
        g.set(count as i64);
    }
}

/// Record a decoded inbound envelope.
#[inline]
pub fn record_envelope(kind: &str) {
    if let Some(c) = ENVELOPES_RECEIVED.get() {
        c.with_label_values(&[kind]).inc();
    }
}

/// Record a dropped inbound frame.
#[inline]
pub fn record_dropped(reason: &str) {
    if let Some(c) = ENVELOPES_DROPPED.get() {
        c.with_label_values(&[reason]).inc();
    }
}

/// Record one outbound envelope reaching `recipients` connections.
#[inline]
pub fn record_fanout(recipients: usize) {
    if let Some(c) = FRAMES_SENT.get() {
        c.inc_by(recipients as u64);
    }
    if let Some(h) = MESSAGE_FANOUT.get() {
        h.observe(recipients as f64);
    }
}
