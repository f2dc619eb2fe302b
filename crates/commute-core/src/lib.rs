//! Core domain types and normalization for commute-board.
//!
//! This crate turns raw upstream payloads into a display-ready snapshot:
//! - `DashboardSnapshot`: line status, train and bus arrivals, weather
//! - `BoardConfig`: stops, lines and allow-sets to aggregate
//! - Normalizers: total functions over loosely-typed JSON that degrade to
//!   defaults instead of failing
//! - Display helpers: ETA rounding and weather labels

pub mod arrivals;
pub mod config;
pub mod display;
pub mod json;
pub mod snapshot;
pub mod status;
pub mod types;
pub mod weather;

pub use config::{BoardConfig, WeatherConfig};
pub use display::{format_eta, minutes_from_seconds, weather_label, EtaState};
pub use snapshot::{build_snapshot, RawFeeds};
pub use status::normalize_status;
pub use types::{
    DashboardSnapshot, Direction, DirectionalArrivals, LineStatus, RawArrival, WeatherSnapshot,
    MAX_ARRIVALS_PER_DIRECTION,
};
pub use weather::normalize_weather;
