//! Prometheus metrics for commute-board.
//!
//! Covers:
//! - Upstream feed fetch outcomes and latency
//! - Snapshot aggregation outcomes
//! - Dashboard WebSocket connections
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. A registration failure means a
//! duplicate metric name, which is a programming error caught at first use.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_gauge, register_histogram_vec, register_int_gauge, CounterVec,
    Encoder, Gauge, HistogramVec, IntGauge, TextEncoder,
};

use crate::error::TelemetryResult;

/// Total upstream fetches.
/// Labels: feed, outcome (ok/status/timeout/transport/decode)
pub static FEED_FETCH_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "commute_feed_fetch_total",
        "Total upstream feed fetches by outcome",
        &["feed", "outcome"]
    )
    .unwrap()
});

/// Upstream fetch latency in milliseconds.
pub static FEED_LATENCY_MS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "commute_feed_latency_ms",
        "Upstream feed fetch latency in milliseconds",
        &["feed"],
        vec![25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0]
    )
    .unwrap()
});

/// Total aggregation cycles.
/// Labels: outcome (ok/configuration/upstream/http_client)
pub static SNAPSHOT_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "commute_snapshot_total",
        "Total snapshot aggregations by outcome",
        &["outcome"]
    )
    .unwrap()
});

/// Unix time (seconds) of the last successful snapshot.
pub static LAST_SNAPSHOT_TIMESTAMP: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!(
        "commute_last_snapshot_timestamp_seconds",
        "Unix time of the last successful snapshot"
    )
    .unwrap()
});

/// Open dashboard WebSocket connections.
pub static WS_CONNECTIONS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "commute_ws_connections",
        "Open dashboard WebSocket connections"
    )
    .unwrap()
});

/// Metrics helper for easy recording.
pub struct Metrics;

impl Metrics {
    /// Record one upstream fetch.
    pub fn feed_fetch(feed: &str, outcome: &str, latency_ms: f64) {
        FEED_FETCH_TOTAL.with_label_values(&[feed, outcome]).inc();
        FEED_LATENCY_MS
            .with_label_values(&[feed])
            .observe(latency_ms);
    }

    /// Record a successful aggregation.
    pub fn snapshot_built(unix_seconds: f64) {
        SNAPSHOT_TOTAL.with_label_values(&["ok"]).inc();
        LAST_SNAPSHOT_TIMESTAMP.set(unix_seconds);
    }

    /// Record a failed aggregation.
    pub fn snapshot_failed(reason: &str) {
        SNAPSHOT_TOTAL.with_label_values(&[reason]).inc();
    }

    pub fn ws_connections_set(count: i64) {
        WS_CONNECTIONS.set(count);
    }

    /// Render all registered metrics in the Prometheus text format.
    pub fn encode_text() -> TelemetryResult<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&prometheus::gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
