//! Feed and aggregation error types.

use thiserror::Error;

use crate::request::FeedKind;

/// Failure of a single upstream request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid JSON body: {0}")]
    Decode(String),
}

impl FetchError {
    /// Metric label for this failure.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            FetchError::Status { .. } => "status",
            FetchError::Timeout => "timeout",
            FetchError::Transport(_) => "transport",
            FetchError::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Failure of a whole aggregation cycle.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Required credentials are missing. Raised before any network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// One of the concurrent upstream calls failed.
    #[error("Upstream fetch failed for {feed}: {source}")]
    UpstreamFetch {
        feed: FeedKind,
        #[source]
        source: FetchError,
    },

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl BoardError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, BoardError::Configuration(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, BoardError::UpstreamFetch { .. })
    }

    /// Metric label for this failure.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            BoardError::Configuration(_) => "configuration",
            BoardError::UpstreamFetch { .. } => "upstream",
            BoardError::HttpClient(_) => "http_client",
        }
    }
}

pub type BoardResult<T> = Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels_distinguish_client_failures() {
        let client = BoardError::HttpClient("TLS backend unavailable".to_string());
        assert_eq!(client.outcome_label(), "http_client");
        assert!(!client.is_configuration());
        assert!(!client.is_upstream());

        let missing = BoardError::Configuration("TFL_APP_ID is not set".to_string());
        assert_eq!(missing.outcome_label(), "configuration");
        assert!(missing.is_configuration());

        let upstream = BoardError::UpstreamFetch {
            feed: FeedKind::Weather,
            source: FetchError::Timeout,
        };
        assert_eq!(upstream.outcome_label(), "upstream");
        assert!(upstream.is_upstream());
        assert!(!upstream.is_configuration());
    }

    #[test]
    fn test_fetch_outcome_labels() {
        assert_eq!(FetchError::Timeout.outcome_label(), "timeout");
        assert_eq!(
            FetchError::Status {
                status: 503,
                reason: "Service Unavailable".to_string()
            }
            .outcome_label(),
            "status"
        );
    }
}
