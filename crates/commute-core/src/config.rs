//! Board configuration: which stops, lines and location to aggregate.
//!
//! Identifiers here are configuration constants, not secrets. Credentials are
//! supplied separately at runtime.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Stops, lines and allow-sets the aggregator works with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// TfL API base URL.
    #[serde(default = "default_tfl_base_url")]
    pub tfl_base_url: String,
    /// Line whose service status is shown.
    #[serde(default = "default_status_line_id")]
    pub status_line_id: String,
    /// Stop serving trains in both directions.
    #[serde(default = "default_train_stop_id")]
    pub train_stop_id: String,
    /// Bus stop for the inbound direction.
    #[serde(default = "default_bus_stop_inbound")]
    pub bus_stop_inbound: String,
    /// Bus stop for the outbound direction.
    #[serde(default = "default_bus_stop_outbound")]
    pub bus_stop_outbound: String,
    /// Train line ids kept from the train stop feed.
    #[serde(default = "default_train_line_ids")]
    pub train_line_ids: BTreeSet<String>,
    /// Bus route ids kept from either bus stop feed.
    #[serde(default = "default_bus_line_ids")]
    pub bus_line_ids: BTreeSet<String>,
    /// Weather location and request options.
    #[serde(default)]
    pub weather: WeatherConfig,
}

fn default_tfl_base_url() -> String {
    "https://api.tfl.gov.uk".to_string()
}

fn default_status_line_id() -> String {
    "elizabeth".to_string()
}

fn default_train_stop_id() -> String {
    "910GACTONML".to_string() // Acton Main Line
}

fn default_bus_stop_inbound() -> String {
    "490006737N".to_string()
}

fn default_bus_stop_outbound() -> String {
    "490015046S".to_string()
}

fn default_train_line_ids() -> BTreeSet<String> {
    ["elizabeth"].into_iter().map(String::from).collect()
}

fn default_bus_line_ids() -> BTreeSet<String> {
    ["266", "440", "N266"].into_iter().map(String::from).collect()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            tfl_base_url: default_tfl_base_url(),
            status_line_id: default_status_line_id(),
            train_stop_id: default_train_stop_id(),
            bus_stop_inbound: default_bus_stop_inbound(),
            bus_stop_outbound: default_bus_stop_outbound(),
            train_line_ids: default_train_line_ids(),
            bus_line_ids: default_bus_line_ids(),
            weather: WeatherConfig::default(),
        }
    }
}

/// Open-Meteo forecast request options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL.
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    /// IANA timezone the hourly timestamps are reported in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_latitude() -> f64 {
    51.5074
}

fn default_longitude() -> f64 {
    -0.1278
}

fn default_timezone() -> String {
    "Europe/London".to_string()
}

fn default_forecast_days() -> u8 {
    1
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            timezone: default_timezone(),
            forecast_days: default_forecast_days(),
        }
    }
}
