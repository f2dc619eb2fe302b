//! Snapshot assembly from raw feed bodies.

use serde_json::Value;

use crate::arrivals;
use crate::config::BoardConfig;
use crate::status::normalize_status;
use crate::types::DashboardSnapshot;
use crate::weather::normalize_weather;

/// Raw JSON bodies from one fetch cycle.
#[derive(Debug, Clone, Default)]
pub struct RawFeeds {
    pub status: Value,
    pub trains: Value,
    pub bus_inbound: Value,
    pub bus_outbound: Value,
    pub weather: Value,
}

/// Normalize every feed and compose the snapshot. Total: never fails.
pub fn build_snapshot(feeds: &RawFeeds, config: &BoardConfig) -> DashboardSnapshot {
    DashboardSnapshot::assemble(
        normalize_status(&feeds.status),
        arrivals::split_by_direction(&feeds.trains, &config.train_line_ids),
        arrivals::from_stop_pair(&feeds.bus_inbound, &feeds.bus_outbound, &config.bus_line_ids),
        normalize_weather(&feeds.weather),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_snapshot_from_all_feeds() {
        let feeds = RawFeeds {
            status: json!([{"lineStatuses": [{"statusSeverityDescription": "Good Service"}]}]),
            trains: json!([
                {"lineId": "elizabeth", "direction": "inbound", "destinationName": "Abbey Wood", "timeToStation": 600},
                {"lineId": "elizabeth", "direction": "inbound", "destinationName": "Shenfield", "timeToStation": 120},
                {"lineId": "elizabeth", "direction": "inbound", "destinationName": "Abbey Wood", "timeToStation": 30},
                {"lineId": "elizabeth", "direction": "outbound", "destinationName": "Reading", "timeToStation": 300}
            ]),
            bus_inbound: json!([
                {"lineId": "999", "destinationName": "Nowhere", "timeToStation": 10},
                {"lineId": "266", "destinationName": "Hammersmith", "timeToStation": 200}
            ]),
            bus_outbound: json!([
                {"lineId": "440", "destinationName": "Stonebridge Park", "timeToStation": 90}
            ]),
            weather: json!({
                "current": {"time": "2024-01-01T10:00", "temperature_2m": 8.1, "weather_code": 3},
                "hourly": {
                    "time": ["2024-01-01T09:00", "2024-01-01T10:00"],
                    "precipitation_probability": [10, 40]
                }
            }),
        };

        let snapshot = build_snapshot(&feeds, &BoardConfig::default());
        assert_eq!(snapshot.status.as_str(), "Good Service");
        let inbound: Vec<i64> = snapshot.trains.inbound.iter().map(|t| t.time_to_station).collect();
        assert_eq!(inbound, vec![30, 120]);
        assert_eq!(snapshot.trains.outbound.len(), 1);
        assert_eq!(snapshot.buses.inbound.len(), 1);
        assert_eq!(snapshot.buses.inbound[0].line_id, "266");
        assert_eq!(snapshot.buses.outbound[0].line_id, "440");
        assert_eq!(snapshot.weather.precip_prob, Some(40));
        assert_eq!(snapshot.weather.wind, None);
    }

    #[test]
    fn test_empty_feeds_give_defaulted_snapshot() {
        let snapshot = build_snapshot(&RawFeeds::default(), &BoardConfig::default());
        assert!(snapshot.status.is_unknown());
        assert!(snapshot.trains.is_empty());
        assert!(snapshot.buses.is_empty());
        assert_eq!(snapshot.weather, Default::default());
    }
}
