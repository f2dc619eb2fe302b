//! Snapshot aggregation: fetch every feed, then normalize.

use chrono::Utc;
use commute_core::{build_snapshot, BoardConfig, DashboardSnapshot, RawFeeds};
use commute_telemetry::Metrics;
use tracing::{debug, info, warn};

use crate::credentials::TflCredentials;
use crate::error::{BoardError, BoardResult};
use crate::fetcher::DynFeedFetcher;
use crate::orchestrator::fetch_all;
use crate::request::{build_requests, FeedKind};

/// Builds one `DashboardSnapshot` per call from the configured feeds.
pub struct SnapshotAggregator {
    fetcher: DynFeedFetcher,
    board: BoardConfig,
    credentials: Option<TflCredentials>,
}

impl SnapshotAggregator {
    /// Create an aggregator.
    ///
    /// `credentials` may be `None`; every aggregation then fails with a
    /// configuration error without touching the network.
    pub fn new(
        fetcher: DynFeedFetcher,
        board: BoardConfig,
        credentials: Option<TflCredentials>,
    ) -> Self {
        if credentials.is_none() {
            warn!("TfL credentials missing; aggregation will fail until configured");
        }
        Self {
            fetcher,
            board,
            credentials,
        }
    }

    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Fetch all feeds concurrently and compose a fresh snapshot.
    ///
    /// Returns a complete snapshot or a single error; never a partial one.
    pub async fn get_dashboard_snapshot(&self) -> BoardResult<DashboardSnapshot> {
        let result = self.aggregate().await;
        match &result {
            Ok(snapshot) => {
                info!(
                    status = %snapshot.status,
                    trains = snapshot.trains.len(),
                    buses = snapshot.buses.len(),
                    "Snapshot built"
                );
                Metrics::snapshot_built(Utc::now().timestamp() as f64);
            }
            Err(e) => {
                warn!(error = %e, "Snapshot aggregation failed");
                Metrics::snapshot_failed(e.outcome_label());
            }
        }
        result
    }

    async fn aggregate(&self) -> BoardResult<DashboardSnapshot> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            BoardError::Configuration("Missing TFL_APP_ID/TFL_APP_KEY env vars".to_string())
        })?;

        let requests = build_requests(&self.board, credentials);
        debug!(feeds = requests.len(), "Fetching feeds");
        let bodies = fetch_all(self.fetcher.as_ref(), &requests).await?;

        let mut feeds = RawFeeds::default();
        for (request, body) in requests.iter().zip(bodies) {
            let slot = match request.kind {
                FeedKind::LineStatus => &mut feeds.status,
                FeedKind::TrainArrivals => &mut feeds.trains,
                FeedKind::BusInbound => &mut feeds.bus_inbound,
                FeedKind::BusOutbound => &mut feeds.bus_outbound,
                FeedKind::Weather => &mut feeds.weather,
            };
            *slot = body;
        }

        Ok(build_snapshot(&feeds, &self.board))
    }
}

impl std::fmt::Debug for SnapshotAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotAggregator")
            .field("board", &self.board)
            .field("credentials", &self.credentials)
            .finish()
    }
}
