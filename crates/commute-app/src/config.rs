//! Application configuration.
//!
//! Loaded from a TOML file layered with `COMMUTE__SECTION__KEY`
//! environment overrides. Every field has a default, so a missing file
//! yields the built-in board.

use commute_core::BoardConfig;
use commute_dashboard::DashboardConfig;
use commute_feed::FetchConfig;
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "COMMUTE_CONFIG";
/// Config file used when neither `--config` nor `COMMUTE_CONFIG` is set.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

const ENV_PREFIX: &str = "COMMUTE";
const ENV_SEPARATOR: &str = "__";
const ENV_LIST_SEPARATOR: &str = ",";
/// Keys whose environment values are comma-separated lists.
const ENV_LIST_KEYS: [&str; 2] = ["board.train_line_ids", "board.bus_line_ids"];

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Stops, lines and weather location.
    #[serde(default)]
    pub board: BoardConfig,
    /// Upstream HTTP settings.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Dashboard server settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Telemetry configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Resolve the config path: explicit argument, then `COMMUTE_CONFIG`,
    /// then `config/default.toml`.
    pub fn resolve_path(cli_path: Option<String>) -> String {
        cli_path
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
    }

    /// Load from `path` (optional) plus process environment overrides.
    pub fn load(path: &str) -> AppResult<Self> {
        Self::load_with_env(path, None)
    }

    /// Load with an explicit environment map instead of the process
    /// environment when `env` is `Some`.
    pub fn load_with_env(path: &str, env: Option<Map<String, String>>) -> AppResult<Self> {
        if !std::path::Path::new(path).exists() {
            tracing::warn!(path = %path, "Config file not found, using defaults");
        }

        let environment = ENV_LIST_KEYS.iter().fold(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .list_separator(ENV_LIST_SEPARATOR)
                .try_parsing(true),
            |environment, key| environment.with_list_parse_key(key),
        );

        let settings = Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(environment.source(env))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document without environment overrides.
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.board.tfl_base_url.trim().is_empty() {
            return Err(AppError::Config("board.tfl_base_url is empty".to_string()));
        }
        if self.board.weather.base_url.trim().is_empty() {
            return Err(AppError::Config(
                "board.weather.base_url is empty".to_string(),
            ));
        }
        if self.fetch.timeout_ms == 0 {
            return Err(AppError::Config("fetch.timeout_ms must be > 0".to_string()));
        }
        if self.dashboard.refresh_interval_secs == 0 {
            return Err(AppError::Config(
                "dashboard.refresh_interval_secs must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
