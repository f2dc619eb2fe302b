//! Arrivals normalization.
//!
//! Turns a raw TfL `StopPoint/{id}/Arrivals` payload into at most
//! [`MAX_ARRIVALS_PER_DIRECTION`] soonest arrivals for the allowed lines.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::trace;

use crate::json::as_integer;
use crate::types::{Direction, DirectionalArrivals, RawArrival, MAX_ARRIVALS_PER_DIRECTION};

/// Parse one upstream arrival item.
///
/// Returns `None` for items without a string `lineId` or an integral
/// `timeToStation`, since they can neither be filtered nor ordered.
pub fn parse_arrival(item: &Value) -> Option<RawArrival> {
    let line_id = item.get("lineId")?.as_str()?;
    let time_to_station = item.get("timeToStation").and_then(as_integer)?;
    let direction = item
        .get("direction")
        .and_then(Value::as_str)
        .map(Direction::from_label)
        .unwrap_or_default();
    let destination_name = item
        .get("destinationName")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Some(RawArrival {
        line_id: line_id.to_string(),
        direction,
        destination_name: destination_name.to_string(),
        time_to_station,
    })
}

/// Parse, filter to the allow-set and stable-sort by time to station.
///
/// A missing or non-array payload yields an empty list.
pub fn filter_sorted(raw: &Value, allowed_lines: &BTreeSet<String>) -> Vec<RawArrival> {
    let Some(items) = raw.as_array() else {
        trace!("Arrivals payload is not an array");
        return Vec::new();
    };

    let mut arrivals: Vec<RawArrival> = items
        .iter()
        .filter_map(parse_arrival)
        .filter(|arrival| allowed_lines.contains(&arrival.line_id))
        .collect();
    // sort_by_key is stable: ties keep feed order
    arrivals.sort_by_key(|arrival| arrival.time_to_station);
    arrivals
}

/// Soonest arrivals from one stop feed, without a direction split.
///
/// Used for bus stops, where each direction has its own stop feed.
pub fn soonest(raw: &Value, allowed_lines: &BTreeSet<String>) -> Vec<RawArrival> {
    let mut arrivals = filter_sorted(raw, allowed_lines);
    arrivals.truncate(MAX_ARRIVALS_PER_DIRECTION);
    arrivals
}

/// Soonest arrivals per direction from one shared stop feed.
///
/// Arrivals with an unspecified direction are dropped.
pub fn split_by_direction(
    raw: &Value,
    allowed_lines: &BTreeSet<String>,
) -> DirectionalArrivals<RawArrival> {
    let sorted = filter_sorted(raw, allowed_lines);
    let take_direction = |direction: Direction| -> Vec<RawArrival> {
        sorted
            .iter()
            .filter(|arrival| arrival.direction == direction)
            .take(MAX_ARRIVALS_PER_DIRECTION)
            .cloned()
            .collect()
    };

    DirectionalArrivals::new(
        take_direction(Direction::Inbound),
        take_direction(Direction::Outbound),
    )
}

/// Combine two single-direction stop feeds.
pub fn from_stop_pair(
    inbound_raw: &Value,
    outbound_raw: &Value,
    allowed_lines: &BTreeSet<String>,
) -> DirectionalArrivals<RawArrival> {
    DirectionalArrivals::new(
        soonest(inbound_raw, allowed_lines),
        soonest(outbound_raw, allowed_lines),
    )
}
