//! TfL API credentials.

use std::fmt;

/// Environment variable holding the TfL application id.
pub const TFL_APP_ID_ENV: &str = "TFL_APP_ID";
/// Environment variable holding the TfL application key.
pub const TFL_APP_KEY_ENV: &str = "TFL_APP_KEY";

/// TfL application credentials, sent as `app_id`/`app_key` query parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct TflCredentials {
    app_id: String,
    app_key: String,
}

impl TflCredentials {
    /// Build credentials from optional raw values.
    ///
    /// Returns `None` when either value is missing or blank.
    pub fn from_values(app_id: Option<String>, app_key: Option<String>) -> Option<Self> {
        let app_id = app_id.filter(|v| !v.trim().is_empty())?;
        let app_key = app_key.filter(|v| !v.trim().is_empty())?;
        Some(Self { app_id, app_key })
    }

    /// Read `TFL_APP_ID` and `TFL_APP_KEY` from the environment.
    pub fn from_env() -> Option<Self> {
        Self::from_values(
            std::env::var(TFL_APP_ID_ENV).ok(),
            std::env::var(TFL_APP_KEY_ENV).ok(),
        )
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Query parameters carrying the credentials.
    pub fn query_params(&self) -> Vec<(String, String)> {
        vec![
            ("app_id".to_string(), self.app_id.clone()),
            ("app_key".to_string(), self.app_key.clone()),
        ]
    }
}

impl fmt::Debug for TflCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TflCredentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_blank_values_rejected() {
        assert!(TflCredentials::from_values(None, Some("key".into())).is_none());
        assert!(TflCredentials::from_values(Some("id".into()), None).is_none());
        assert!(TflCredentials::from_values(Some("".into()), Some("key".into())).is_none());
        assert!(TflCredentials::from_values(Some("id".into()), Some("  ".into())).is_none());
    }

    #[test]
    fn test_query_params() {
        let creds = TflCredentials::from_values(Some("id".into()), Some("key".into())).unwrap();
        assert_eq!(
            creds.query_params(),
            vec![
                ("app_id".to_string(), "id".to_string()),
                ("app_key".to_string(), "key".to_string())
            ]
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds =
            TflCredentials::from_values(Some("id".into()), Some("secret-key".into())).unwrap();
        let debug = format!("{creds:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
