//! Dashboard data model.
//!
//! These types are serialized as the snapshot JSON served to the rendering
//! layer, so field names follow the camelCase wire shape.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of arrivals kept per direction.
pub const MAX_ARRIVALS_PER_DIRECTION: usize = 2;

/// Sentinel status label used when the status feed is absent or malformed.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Label TfL uses for a line running normally.
pub const GOOD_SERVICE: &str = "Good Service";

/// Travel direction reported by an arrivals feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
    /// Empty, missing or unrecognized direction.
    #[default]
    #[serde(other)]
    Unspecified,
}

impl Direction {
    /// Parse an upstream direction label. Anything other than
    /// `inbound`/`outbound` maps to `Unspecified`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "inbound" => Direction::Inbound,
            "outbound" => Direction::Outbound,
            _ => Direction::Unspecified,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inbound => write!(f, "inbound"),
            Direction::Outbound => write!(f, "outbound"),
            Direction::Unspecified => write!(f, "unspecified"),
        }
    }
}

/// One predicted arrival at a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArrival {
    /// Line identifier (e.g., "elizabeth", "266").
    pub line_id: String,
    /// Direction of travel.
    #[serde(default)]
    pub direction: Direction,
    /// Destination shown to the rider.
    #[serde(default)]
    pub destination_name: String,
    /// Seconds until arrival. Zero or negative means imminent.
    pub time_to_station: i64,
}

/// Arrivals split by direction, soonest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalArrivals<T> {
    pub inbound: Vec<T>,
    pub outbound: Vec<T>,
}

impl<T> Default for DirectionalArrivals<T> {
    fn default() -> Self {
        Self {
            inbound: Vec::new(),
            outbound: Vec::new(),
        }
    }
}

impl<T> DirectionalArrivals<T> {
    pub fn new(inbound: Vec<T>, outbound: Vec<T>) -> Self {
        Self { inbound, outbound }
    }

    /// Total number of arrivals across both directions.
    pub fn len(&self) -> usize {
        self.inbound.len() + self.outbound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inbound.is_empty() && self.outbound.is_empty()
    }
}

/// Current service health label for a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineStatus(String);

impl LineStatus {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Status used when the upstream payload has no usable description.
    pub fn unknown() -> Self {
        Self(UNKNOWN_STATUS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_STATUS
    }

    /// True only for the exact "Good Service" label.
    pub fn is_good_service(&self) -> bool {
        self.0 == GOOD_SERVICE
    }
}

impl Default for LineStatus {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for LineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current weather conditions. Every field degrades to `None` independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Air temperature (°C).
    pub temp: Option<f64>,
    /// Apparent temperature (°C).
    pub feels_like: Option<f64>,
    /// Wind speed (km/h).
    pub wind: Option<f64>,
    /// WMO weather condition code.
    pub code: Option<i64>,
    /// Precipitation probability for the current hour (0-100).
    pub precip_prob: Option<u8>,
}

/// One complete aggregation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub status: LineStatus,
    pub trains: DirectionalArrivals<RawArrival>,
    pub buses: DirectionalArrivals<RawArrival>,
    pub weather: WeatherSnapshot,
}

impl DashboardSnapshot {
    /// Compose normalized pieces. Never fails; every field is already defaulted.
    pub fn assemble(
        status: LineStatus,
        trains: DirectionalArrivals<RawArrival>,
        buses: DirectionalArrivals<RawArrival>,
        weather: WeatherSnapshot,
    ) -> Self {
        Self {
            status,
            trains,
            buses,
            weather,
        }
    }
}
