//! Presentation helpers shared by renderers.

use std::fmt;

use serde::Serialize;

/// Arrivals at or under this many minutes are shown as "soon".
pub const SOON_THRESHOLD_MINUTES: i64 = 2;

/// Round seconds to the nearest whole minute, halves rounding up.
pub fn minutes_from_seconds(seconds: i64) -> i64 {
    (seconds as f64 / 60.0 + 0.5).floor() as i64
}

/// Urgency bucket for an arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EtaState {
    /// Rounds to zero or fewer minutes.
    Due,
    /// Within [`SOON_THRESHOLD_MINUTES`].
    Soon,
    Later,
}

impl EtaState {
    pub fn from_seconds(seconds: i64) -> Self {
        let minutes = minutes_from_seconds(seconds);
        if minutes <= 0 {
            EtaState::Due
        } else if minutes <= SOON_THRESHOLD_MINUTES {
            EtaState::Soon
        } else {
            EtaState::Later
        }
    }

    /// Due and soon arrivals are highlighted.
    pub fn is_urgent(&self) -> bool {
        !matches!(self, EtaState::Later)
    }
}

/// Human label for an arrival time: "Due" or "N min".
pub fn format_eta(seconds: i64) -> String {
    let minutes = minutes_from_seconds(seconds);
    if minutes <= 0 {
        "Due".to_string()
    } else {
        format!("{minutes} min")
    }
}

/// Short label for a WMO weather code.
pub fn weather_label(code: Option<i64>) -> &'static str {
    match code {
        Some(0) => "Clear",
        Some(1..=3) => "Partly cloudy",
        Some(45 | 48) => "Fog",
        Some(51 | 53 | 55 | 56 | 57) => "Drizzle",
        Some(61 | 63 | 65 | 66 | 67) => "Rain",
        Some(71 | 73 | 75 | 77) => "Snow",
        Some(80..=82) => "Showers",
        Some(95 | 96 | 99) => "Thunder",
        _ => "Weather",
    }
}

/// Optional measurement rounded for display, with a placeholder when absent.
pub struct Rounded(pub Option<f64>);

impl fmt::Display for Rounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value.round() as i64),
            None => f.write_str("--"),
        }
    }
}
