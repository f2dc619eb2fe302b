//! Background refresh loop.
//!
//! The poller runs one aggregation per interval, stores the outcome in
//! `DashboardState` and broadcasts it to connected WebSocket clients.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use commute_feed::SnapshotAggregator;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

use crate::state::DashboardState;
use crate::types::DashboardMessage;

/// Run the refresh loop forever. The first refresh happens immediately.
pub async fn run_poller(
    aggregator: Arc<SnapshotAggregator>,
    state: DashboardState,
    tx: broadcast::Sender<String>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        refresh_once(&aggregator, &state, &tx).await;
    }
}

/// Perform one refresh. Returns true on success.
pub async fn refresh_once(
    aggregator: &SnapshotAggregator,
    state: &DashboardState,
    tx: &broadcast::Sender<String>,
) -> bool {
    let (msg, ok) = match aggregator.get_dashboard_snapshot().await {
        Ok(snapshot) => {
            let timestamp_ms = state.record_success(snapshot.clone());
            (
                DashboardMessage::Snapshot {
                    timestamp_ms,
                    snapshot,
                },
                true,
            )
        }
        Err(e) => {
            let error = e.to_string();
            state.record_failure(error.clone());
            warn!(
                error = %error,
                failures = state.failures_since_success(),
                "Refresh failed, keeping previous snapshot"
            );
            (
                DashboardMessage::FetchFailed {
                    timestamp_ms: Utc::now().timestamp_millis(),
                    error,
                },
                false,
            )
        }
    };

    match serde_json::to_string(&msg) {
        Ok(json) => match tx.send(json) {
            Ok(n) => trace!(receivers = n, "Refresh broadcast sent"),
            // No receivers - normal when no clients are connected
            Err(_) => trace!("No WebSocket receivers connected"),
        },
        Err(e) => debug!(error = %e, "Failed to serialize dashboard message"),
    }

    ok
}
