//! Main application orchestration.

use std::sync::Arc;

use commute_core::DashboardSnapshot;
use commute_dashboard::run_server;
use commute_feed::{DynFeedFetcher, HttpFetcher, SnapshotAggregator, TflCredentials};
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Main application.
pub struct Application {
    config: AppConfig,
    aggregator: Arc<SnapshotAggregator>,
}

impl Application {
    /// Create the application with the reqwest fetcher and credentials
    /// from `TFL_APP_ID`/`TFL_APP_KEY`.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let fetcher: DynFeedFetcher = Arc::new(HttpFetcher::new(&config.fetch)?);
        let credentials = TflCredentials::from_env();
        match &credentials {
            Some(creds) => info!(app_id = %creds.app_id(), "TfL credentials loaded"),
            None => warn!("TFL_APP_ID/TFL_APP_KEY not set"),
        }
        Ok(Self::with_fetcher(config, fetcher, credentials))
    }

    /// Create the application with an explicit fetcher and credentials.
    pub fn with_fetcher(
        config: AppConfig,
        fetcher: DynFeedFetcher,
        credentials: Option<TflCredentials>,
    ) -> Self {
        let aggregator = Arc::new(SnapshotAggregator::new(
            fetcher,
            config.board.clone(),
            credentials,
        ));
        Self { config, aggregator }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Perform a single aggregation.
    pub async fn run_once(&self) -> AppResult<DashboardSnapshot> {
        Ok(self.aggregator.get_dashboard_snapshot().await?)
    }

    /// Serve the dashboard until Ctrl-C or a server failure.
    pub async fn run(self) -> AppResult<()> {
        info!(
            address = %self.config.dashboard.bind_address(),
            refresh_secs = self.config.dashboard.refresh_interval_secs,
            "Starting application"
        );

        let server = run_server(Arc::clone(&self.aggregator), self.config.dashboard.clone());

        tokio::select! {
            result = server => {
                if let Err(e) = result {
                    error!(error = %e, "Dashboard server failed");
                    return Err(AppError::Server(e.to_string()));
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
            }
        }

        info!("Shutting down");
        Ok(())
    }
}
