//! Dashboard state management.
//!
//! DashboardState holds the refresh loop's most recent good snapshot. A
//! failed refresh records its error but never discards the snapshot.

use std::sync::Arc;

use chrono::Utc;
use commute_core::DashboardSnapshot;
use parking_lot::RwLock;

use crate::types::LatestResponse;

#[derive(Debug, Default)]
struct Inner {
    snapshot: Option<DashboardSnapshot>,
    updated_at_ms: i64,
    last_error: Option<String>,
    failures_since_success: u64,
}

/// Latest-snapshot store shared between the poller and HTTP handlers.
#[derive(Clone, Default)]
pub struct DashboardState {
    inner: Arc<RwLock<Inner>>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a successful snapshot and clear the error. Returns its timestamp.
    pub fn record_success(&self, snapshot: DashboardSnapshot) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        let mut inner = self.inner.write();
        inner.snapshot = Some(snapshot);
        inner.updated_at_ms = now_ms;
        inner.last_error = None;
        inner.failures_since_success = 0;
        now_ms
    }

    /// Record a failed refresh. The previous snapshot is kept.
    pub fn record_failure(&self, error: impl Into<String>) {
        let mut inner = self.inner.write();
        inner.last_error = Some(error.into());
        inner.failures_since_success += 1;
    }

    /// Latest snapshot with metadata, or `None` before the first success.
    pub fn latest(&self) -> Option<LatestResponse> {
        let inner = self.inner.read();
        inner.snapshot.as_ref().map(|snapshot| LatestResponse {
            snapshot: snapshot.clone(),
            updated_at_ms: inner.updated_at_ms,
            last_error: inner.last_error.clone(),
        })
    }

    pub fn snapshot(&self) -> Option<DashboardSnapshot> {
        self.inner.read().snapshot.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.read().last_error.clone()
    }

    /// Consecutive failed refreshes since the last success.
    pub fn failures_since_success(&self) -> u64 {
        self.inner.read().failures_since_success
    }
}

impl std::fmt::Debug for DashboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("DashboardState")
            .field("has_snapshot", &inner.snapshot.is_some())
            .field("updated_at_ms", &inner.updated_at_ms)
            .field("last_error", &inner.last_error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commute_core::{DirectionalArrivals, LineStatus, WeatherSnapshot};

    fn snapshot(status: &str) -> DashboardSnapshot {
        DashboardSnapshot {
            status: LineStatus::new(status),
            trains: DirectionalArrivals::default(),
            buses: DirectionalArrivals::default(),
            weather: WeatherSnapshot::default(),
        }
    }

    #[test]
    fn test_empty_until_first_success() {
        let state = DashboardState::new();
        assert!(state.latest().is_none());

        state.record_failure("Upstream fetch failed");
        assert!(state.latest().is_none());
        assert_eq!(state.last_error().as_deref(), Some("Upstream fetch failed"));
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let state = DashboardState::new();
        let updated = state.record_success(snapshot("Good Service"));
        state.record_failure("timeout");
        state.record_failure("timeout");

        let latest = state.latest().unwrap();
        assert_eq!(latest.snapshot.status.as_str(), "Good Service");
        assert_eq!(latest.updated_at_ms, updated);
        assert_eq!(latest.last_error.as_deref(), Some("timeout"));
        assert_eq!(state.failures_since_success(), 2);
    }

    #[test]
    fn test_success_clears_error() {
        let state = DashboardState::new();
        state.record_failure("timeout");
        state.record_success(snapshot("Minor Delays"));

        assert!(state.last_error().is_none());
        assert_eq!(state.failures_since_success(), 0);
        assert_eq!(state.snapshot().unwrap().status.as_str(), "Minor Delays");
    }
}
