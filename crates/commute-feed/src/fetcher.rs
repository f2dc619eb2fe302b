//! Upstream JSON fetching.
//!
//! `FeedFetcher` abstracts a single GET-and-parse so the aggregator can be
//! driven by the real HTTP client or by `MockFetcher` in tests.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{BoardError, BoardResult, FetchError, FetchResult};
use crate::request::{FeedKind, FeedRequest};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// HTTP fetch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Advisory cache TTL sent as `Cache-Control: max-age`. 0 disables the hint.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// User-Agent header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_cache_ttl_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("commute-board/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Fetches one feed and parses its body as JSON.
pub trait FeedFetcher: Send + Sync {
    /// Issue the request. Non-success status, transport failure, timeout and
    /// non-JSON bodies are all errors.
    fn fetch_json<'a>(&'a self, request: &'a FeedRequest) -> BoxFuture<'a, FetchResult<Value>>;
}

/// Arc wrapper for FeedFetcher trait objects.
pub type DynFeedFetcher = Arc<dyn FeedFetcher>;

/// reqwest-backed fetcher.
pub struct HttpFetcher {
    client: Client,
    cache_control: Option<String>,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> BoardResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| BoardError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        let cache_control =
            (config.cache_ttl_secs > 0).then(|| format!("max-age={}", config.cache_ttl_secs));

        Ok(Self {
            client,
            cache_control,
        })
    }

    async fn get_json(&self, request: &FeedRequest) -> FetchResult<Value> {
        debug!(feed = %request.kind, url = %request.url, "Fetching feed");

        let mut builder = self.client.get(&request.url).query(&request.query);
        if let Some(cache_control) = &self.cache_control {
            builder = builder.header(CACHE_CONTROL, cache_control.as_str());
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(feed = %request.kind, status = status.as_u16(), "Feed returned error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl FeedFetcher for HttpFetcher {
    fn fetch_json<'a>(&'a self, request: &'a FeedRequest) -> BoxFuture<'a, FetchResult<Value>> {
        Box::pin(self.get_json(request))
    }
}

/// Mock fetcher for testing.
///
/// Returns configured responses per feed (JSON `null` when unset) and
/// records every request it receives.
#[derive(Debug, Default)]
pub struct MockFetcher {
    /// Configured result per feed.
    responses: Mutex<HashMap<FeedKind, FetchResult<Value>>>,
    /// Artificial latency per feed.
    delays: Mutex<HashMap<FeedKind, Duration>>,
    /// Recorded requests for verification.
    calls: Mutex<Vec<FeedRequest>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `kind` with a JSON body.
    pub fn set_response(&self, kind: FeedKind, body: Value) {
        self.responses.lock().insert(kind, Ok(body));
    }

    /// Fail requests for `kind`.
    pub fn set_error(&self, kind: FeedKind, error: FetchError) {
        self.responses.lock().insert(kind, Err(error));
    }

    /// Delay the response for `kind`.
    pub fn set_delay(&self, kind: FeedKind, delay: Duration) {
        self.delays.lock().insert(kind, delay);
    }

    /// Get recorded requests.
    pub fn calls(&self) -> Vec<FeedRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl FeedFetcher for MockFetcher {
    fn fetch_json<'a>(&'a self, request: &'a FeedRequest) -> BoxFuture<'a, FetchResult<Value>> {
        Box::pin(async move {
            self.calls.lock().push(request.clone());
            let delay = self.delays.lock().get(&request.kind).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.responses
                .lock()
                .get(&request.kind)
                .cloned()
                .unwrap_or(Ok(Value::Null))
        })
    }
}
