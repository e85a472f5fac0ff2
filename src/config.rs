//! Environment-driven configuration.

use std::time::Duration;

use crate::error::config::ConfigError;

/// Default REST endpoint for the analytical store.
pub static DEFAULT_BIGQUERY_API_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// Default request timeout for analytical store queries.
pub const DEFAULT_BIGQUERY_TIMEOUT: Duration = Duration::from_secs(60);

/// Runtime configuration for the back-office repositories.
#[derive(Clone, Debug)]
pub struct Config {
    /// Relational store connection string.
    pub database_url: String,
    /// Secret used by both PII cipher schemes, `None` falls back to the placeholder key.
    pub encryption_key: Option<String>,
    /// Base URL of the dashboard used to build entity deep links.
    pub dashboard_url: String,
    /// Analytical store settings.
    pub analytics: AnalyticsConfig,
}

/// Connection settings for the analytical store.
#[derive(Clone, Debug)]
pub struct AnalyticsConfig {
    /// Cloud project the queries are billed to.
    pub project_id: String,
    /// REST API base URL, overridable for tests and emulators.
    pub api_url: String,
    /// OAuth2 bearer token, omitted for emulators that don't check auth.
    pub access_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Config {
    /// Loads `.env` (if present) and then reads configuration from the environment.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables were present and valid
    /// - `Err(ConfigError)` - A required variable is missing or a value failed to parse
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Reads configuration from the process environment.
    ///
    /// # Required variables
    /// - `DATABASE_URL`
    /// - `AGHANIM_DASHBOARD_URL`
    /// - `BIGQUERY_PROJECT_ID`
    ///
    /// # Optional variables
    /// - `DATABASE_ENCRYPTION_KEY` - PII secret, falls back to an unsafe placeholder when unset
    /// - `BIGQUERY_API_URL` - defaults to [`DEFAULT_BIGQUERY_API_URL`]
    /// - `BIGQUERY_ACCESS_TOKEN` - bearer token for the analytical store
    /// - `BIGQUERY_TIMEOUT_SECS` - request timeout in seconds, defaults to 60
    ///
    /// # Returns
    /// - `Ok(Config)` - Configuration read successfully
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset
    /// - `Err(ConfigError::InvalidEnvValue)` - A variable is set to an unusable value
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout = match optional_var("BIGQUERY_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidEnvValue {
                        var: "BIGQUERY_TIMEOUT_SECS".to_string(),
                        reason: e.to_string(),
                    })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_BIGQUERY_TIMEOUT,
        };

        let dashboard_url = required_var("AGHANIM_DASHBOARD_URL")?;
        if !dashboard_url.starts_with("http://") && !dashboard_url.starts_with("https://") {
            return Err(ConfigError::InvalidEnvValue {
                var: "AGHANIM_DASHBOARD_URL".to_string(),
                reason: "expected an http(s) URL".to_string(),
            });
        }

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            encryption_key: optional_var("DATABASE_ENCRYPTION_KEY"),
            dashboard_url,
            analytics: AnalyticsConfig {
                project_id: required_var("BIGQUERY_PROJECT_ID")?,
                api_url: optional_var("BIGQUERY_API_URL")
                    .unwrap_or_else(|| DEFAULT_BIGQUERY_API_URL.to_string()),
                access_token: optional_var("BIGQUERY_ACCESS_TOKEN"),
                timeout,
            },
        })
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    optional_var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Unset and empty variables are both treated as absent.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
