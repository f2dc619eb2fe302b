//! Dashboard API types.
//!
//! These types are used for JSON serialization in REST and WebSocket APIs.

use commute_core::DashboardSnapshot;
use serde::Serialize;

/// Message pushed to WebSocket clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardMessage {
    /// A fresh snapshot from the refresh loop.
    Snapshot {
        #[serde(rename = "timestampMs")]
        timestamp_ms: i64,
        snapshot: DashboardSnapshot,
    },
    /// A refresh attempt failed; clients keep showing the previous snapshot.
    FetchFailed {
        #[serde(rename = "timestampMs")]
        timestamp_ms: i64,
        error: String,
    },
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Latest snapshot held by the refresh loop.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestResponse {
    #[serde(flatten)]
    pub snapshot: DashboardSnapshot,
    /// When `snapshot` was built (Unix milliseconds).
    pub updated_at_ms: i64,
    /// Most recent refresh error, if the last attempt failed.
    pub last_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use commute_core::{DirectionalArrivals, LineStatus, WeatherSnapshot};

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            status: LineStatus::new("Good Service"),
            trains: DirectionalArrivals::default(),
            buses: DirectionalArrivals::default(),
            weather: WeatherSnapshot::default(),
        }
    }

    #[test]
    fn test_message_tagging() {
        let msg = DashboardMessage::FetchFailed {
            timestamp_ms: 5,
            error: "boom".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "fetch_failed");
        assert_eq!(json["timestampMs"], 5);
        assert_eq!(json["error"], "boom");

        let msg = DashboardMessage::Snapshot {
            timestamp_ms: 7,
            snapshot: snapshot(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "snapshot");
        assert_eq!(json["snapshot"]["status"], "Good Service");
    }

    #[test]
    fn test_latest_response_flattens_snapshot() {
        let latest = LatestResponse {
            snapshot: snapshot(),
            updated_at_ms: 1_700_000_000_000,
            last_error: None,
        };
        let json = serde_json::to_value(&latest).unwrap();
        assert_eq!(json["status"], "Good Service");
        assert!(json["trains"]["inbound"].is_array());
        assert_eq!(json["updatedAtMs"], 1_700_000_000_000i64);
        assert!(json["lastError"].is_null());
    }
}
