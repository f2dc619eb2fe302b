//! Upstream feed fetching and snapshot aggregation.
//!
//! Issues the line-status, arrivals and weather requests concurrently,
//! joins them, and hands the raw bodies to the `commute-core` normalizers.
//! Any single fetch failure fails the whole aggregation.

pub mod aggregator;
pub mod credentials;
pub mod error;
pub mod fetcher;
pub mod orchestrator;
pub mod request;

pub use aggregator::SnapshotAggregator;
pub use credentials::{TflCredentials, TFL_APP_ID_ENV, TFL_APP_KEY_ENV};
pub use error::{BoardError, BoardResult, FetchError, FetchResult};
pub use fetcher::{BoxFuture, DynFeedFetcher, FeedFetcher, FetchConfig, HttpFetcher, MockFetcher};
pub use orchestrator::fetch_all;
pub use request::{build_requests, FeedKind, FeedRequest};
