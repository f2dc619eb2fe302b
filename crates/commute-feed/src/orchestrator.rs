//! Concurrent fan-out of feed requests.

use std::time::Instant;

use commute_telemetry::Metrics;
use futures_util::future::try_join_all;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{BoardError, BoardResult};
use crate::fetcher::FeedFetcher;
use crate::request::FeedRequest;

/// Issue every request concurrently and return the bodies in request order.
///
/// The first failure aborts the whole operation: remaining in-flight
/// requests are dropped and the failing feed is reported.
pub async fn fetch_all(
    fetcher: &dyn FeedFetcher,
    requests: &[FeedRequest],
) -> BoardResult<Vec<Value>> {
    let fetches = requests.iter().map(|request| async move {
        let started = Instant::now();
        let result = fetcher.fetch_json(request).await;
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(body) => {
                debug!(feed = %request.kind, latency_ms, "Feed fetched");
                Metrics::feed_fetch(request.kind.as_str(), "ok", latency_ms);
                Ok(body)
            }
            Err(source) => {
                warn!(feed = %request.kind, error = %source, latency_ms, "Feed fetch failed");
                Metrics::feed_fetch(request.kind.as_str(), source.outcome_label(), latency_ms);
                Err(BoardError::UpstreamFetch {
                    feed: request.kind,
                    source,
                })
            }
        }
    });

    try_join_all(fetches).await
}
