//! commute-dashboard - HTTP and WebSocket surface for commute-board.
//!
//! - `GET /api/dashboard` runs one aggregation on demand
//! - `GET /api/latest` returns the refresh loop's latest snapshot
//! - `GET /ws` pushes each refresh outcome to connected clients
//! - `GET /metrics` exposes prometheus metrics
//! - `GET /` serves the static board page
//!
//! # Usage
//!
//! ```ignore
//! use commute_dashboard::{run_server, DashboardConfig};
//!
//! let aggregator = Arc::new(SnapshotAggregator::new(fetcher, board, credentials));
//! run_server(aggregator, DashboardConfig::default()).await?;
//! ```

mod config;
mod poller;
mod server;
mod state;
mod types;

pub use config::DashboardConfig;
pub use poller::{refresh_once, run_poller};
pub use server::{create_router, run_server, AppState, ConnectionGuard, ConnectionLimiter};
pub use state::DashboardState;
pub use types::{DashboardMessage, ErrorBody, LatestResponse};
