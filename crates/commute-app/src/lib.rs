//! Commute board application.
//!
//! Wires configuration, the HTTP feed fetcher, the snapshot aggregator and
//! the dashboard server together, and renders one-shot terminal output.

pub mod app;
pub mod config;
pub mod error;
pub mod render;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
