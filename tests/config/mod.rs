use std::time::Duration;

use backoffice::{
    config::{Config, DEFAULT_BIGQUERY_API_URL, DEFAULT_BIGQUERY_TIMEOUT},
    error::config::ConfigError,
};

const VARS: [&str; 7] = [
    "DATABASE_URL",
    "DATABASE_ENCRYPTION_KEY",
    "AGHANIM_DASHBOARD_URL",
    "BIGQUERY_PROJECT_ID",
    "BIGQUERY_API_URL",
    "BIGQUERY_ACCESS_TOKEN",
    "BIGQUERY_TIMEOUT_SECS",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

fn set_required() {
    std::env::set_var("DATABASE_URL", "postgres://localhost/backoffice");
    std::env::set_var("AGHANIM_DASHBOARD_URL", "https://dashboard.example.com");
    std::env::set_var("BIGQUERY_PROJECT_ID", "analytics-prod");
}

/// The process environment is shared, so every case runs inside this one test
#[test]
fn reads_configuration_from_environment() {
    clear_env();
    let result = Config::from_env();
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref var)) if var == "AGHANIM_DASHBOARD_URL"),
        "unexpected result: {:?}",
        result
    );

    set_required();
    let config = Config::from_env().expect("required variables are set");
    assert_eq!(config.database_url, "postgres://localhost/backoffice");
    assert_eq!(config.encryption_key, None);
    assert_eq!(config.analytics.project_id, "analytics-prod");
    assert_eq!(config.analytics.api_url, DEFAULT_BIGQUERY_API_URL);
    assert_eq!(config.analytics.access_token, None);
    assert_eq!(config.analytics.timeout, DEFAULT_BIGQUERY_TIMEOUT);

    std::env::set_var("DATABASE_ENCRYPTION_KEY", "0123456789abcdef");
    std::env::set_var("BIGQUERY_API_URL", "http://localhost:9050/bigquery/v2");
    std::env::set_var("BIGQUERY_TIMEOUT_SECS", "5");
    // empty counts as unset
    std::env::set_var("BIGQUERY_ACCESS_TOKEN", "");
    let config = Config::from_env().expect("optional variables are valid");
    assert_eq!(config.encryption_key.as_deref(), Some("0123456789abcdef"));
    assert_eq!(config.analytics.api_url, "http://localhost:9050/bigquery/v2");
    assert_eq!(config.analytics.timeout, Duration::from_secs(5));
    assert_eq!(config.analytics.access_token, None);

    std::env::set_var("BIGQUERY_TIMEOUT_SECS", "soon");
    let result = Config::from_env();
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvValue { ref var, .. }) if var == "BIGQUERY_TIMEOUT_SECS"),
        "unexpected result: {:?}",
        result
    );

    std::env::remove_var("BIGQUERY_TIMEOUT_SECS");
    std::env::set_var("AGHANIM_DASHBOARD_URL", "dashboard.example.com");
    let result = Config::from_env();
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvValue { ref var, .. }) if var == "AGHANIM_DASHBOARD_URL"),
        "unexpected result: {:?}",
        result
    );

    clear_env();
}
