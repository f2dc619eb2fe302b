//! Upstream request descriptors.

use std::fmt;

use commute_core::BoardConfig;
use serde::Serialize;

use crate::credentials::TflCredentials;

/// Fields requested from the Open-Meteo `current` block.
const WEATHER_CURRENT_FIELDS: &str =
    "temperature_2m,apparent_temperature,wind_speed_10m,weather_code";
/// Fields requested from the Open-Meteo `hourly` block.
const WEATHER_HOURLY_FIELDS: &str = "precipitation_probability";

/// Identity of an upstream feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    LineStatus,
    TrainArrivals,
    BusInbound,
    BusOutbound,
    Weather,
}

impl FeedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::LineStatus => "line_status",
            FeedKind::TrainArrivals => "train_arrivals",
            FeedKind::BusInbound => "bus_inbound",
            FeedKind::BusOutbound => "bus_outbound",
            FeedKind::Weather => "weather",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One GET request: URL plus query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRequest {
    pub kind: FeedKind,
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl FeedRequest {
    pub fn new(kind: FeedKind, url: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            kind,
            url: url.into(),
            query,
        }
    }

    /// Look up a query parameter by name.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Build the fixed request set for one aggregation cycle.
///
/// Order: line status, train arrivals, inbound bus, outbound bus, weather.
pub fn build_requests(board: &BoardConfig, credentials: &TflCredentials) -> Vec<FeedRequest> {
    let tfl = board.tfl_base_url.trim_end_matches('/');
    let stop_arrivals = |stop_id: &str| format!("{tfl}/StopPoint/{stop_id}/Arrivals");

    vec![
        FeedRequest::new(
            FeedKind::LineStatus,
            format!("{tfl}/Line/{}/Status", board.status_line_id),
            credentials.query_params(),
        ),
        FeedRequest::new(
            FeedKind::TrainArrivals,
            stop_arrivals(&board.train_stop_id),
            credentials.query_params(),
        ),
        FeedRequest::new(
            FeedKind::BusInbound,
            stop_arrivals(&board.bus_stop_inbound),
            credentials.query_params(),
        ),
        FeedRequest::new(
            FeedKind::BusOutbound,
            stop_arrivals(&board.bus_stop_outbound),
            credentials.query_params(),
        ),
        weather_request(board),
    ]
}

fn weather_request(board: &BoardConfig) -> FeedRequest {
    let weather = &board.weather;
    let query = vec![
        ("latitude".to_string(), weather.latitude.to_string()),
        ("longitude".to_string(), weather.longitude.to_string()),
        ("current".to_string(), WEATHER_CURRENT_FIELDS.to_string()),
        ("hourly".to_string(), WEATHER_HOURLY_FIELDS.to_string()),
        ("forecast_days".to_string(), weather.forecast_days.to_string()),
        ("timezone".to_string(), weather.timezone.clone()),
    ];

    FeedRequest::new(
        FeedKind::Weather,
        format!("{}/v1/forecast", weather.base_url.trim_end_matches('/')),
        query,
    )
}
