//! Weather normalization for Open-Meteo forecast payloads.
//!
//! Open-Meteo reports point-in-time conditions under `current` and the
//! precipitation probability only under `hourly`, as parallel `time` and
//! `precipitation_probability` arrays. The probability is aligned to the
//! current sample by timestamp lookup.

use serde_json::Value;

use crate::json::{as_integer, as_percent};
use crate::types::WeatherSnapshot;

/// Normalize a forecast payload. Missing or malformed fields become `None`.
pub fn normalize_weather(raw: &Value) -> WeatherSnapshot {
    WeatherSnapshot {
        temp: current_field(raw, "temperature_2m").and_then(Value::as_f64),
        feels_like: current_field(raw, "apparent_temperature").and_then(Value::as_f64),
        wind: current_field(raw, "wind_speed_10m").and_then(Value::as_f64),
        code: current_field(raw, "weather_code").and_then(as_integer),
        precip_prob: current_precip_prob(raw),
    }
}

fn current_field<'a>(raw: &'a Value, name: &str) -> Option<&'a Value> {
    raw.get("current")?.get(name)
}

/// Precipitation probability for the current hour.
///
/// Uses the hourly slot whose timestamp equals `current.time`. When the
/// current timestamp is absent or has no matching slot, falls back to the
/// first slot.
fn current_precip_prob(raw: &Value) -> Option<u8> {
    let hourly = raw.get("hourly")?;
    let probabilities = hourly.get("precipitation_probability")?.as_array()?;

    let current_time = current_field(raw, "time").filter(|t| !t.is_null());
    let matched_index = current_time.and_then(|time| {
        hourly
            .get("time")
            .and_then(Value::as_array)
            .and_then(|times| times.iter().position(|t| t == time))
    });

    probabilities
        .get(matched_index.unwrap_or(0))
        .and_then(as_percent)
}
