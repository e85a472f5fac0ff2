//! Analytical store access.
//!
//! Queries are standard SQL with named parameters (`@name`). Rows come back as JSON objects
//! keyed by column name; the helpers in this module read typed values out of them and
//! report a typed [`AnalyticsError::InvalidColumn`] when a value has the wrong shape.

pub mod bigquery;

use std::future::Future;

use chrono::{DateTime, NaiveDateTime};
use serde_json::{Map, Value};

use crate::error::analytics::AnalyticsError;

pub use bigquery::BigQueryClient;

/// One result row, keyed by column name.
pub type AnalyticsRow = Map<String, Value>;

/// Typed value of a named query parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParameterValue {
    /// `INT64`
    Int64(i64),
    /// `STRING`
    String(String),
}

/// Named query parameter bound to `@name` in the SQL text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryParameter {
    /// Parameter name without the `@` prefix.
    pub name: String,
    /// Bound value.
    pub value: ParameterValue,
}

impl QueryParameter {
    /// `INT64` parameter.
    pub fn int64(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value: ParameterValue::Int64(value),
        }
    }

    /// `STRING` parameter.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: ParameterValue::String(value.into()),
        }
    }
}

/// SQL text plus its named parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsQuery {
    /// Standard SQL text.
    pub sql: String,
    /// Parameters referenced by the SQL text.
    pub params: Vec<QueryParameter>,
}

impl AnalyticsQuery {
    /// Creates a query.
    pub fn new(sql: impl Into<String>, params: Vec<QueryParameter>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Looks up a parameter by name.
    pub fn param(&self, name: &str) -> Option<&ParameterValue> {
        self.params
            .iter()
            .find(|param| param.name == name)
            .map(|param| &param.value)
    }
}

/// Client able to run parameterized SQL against the analytical store.
pub trait AnalyticsClient: Send + Sync {
    /// Runs `query` and returns all result rows.
    ///
    /// # Returns
    /// - `Ok(Vec<AnalyticsRow>)` - Rows in result order
    /// - `Err(AnalyticsError)` - Transport failure, rejected query or malformed response
    fn query(
        &self,
        query: &AnalyticsQuery,
    ) -> impl Future<Output = Result<Vec<AnalyticsRow>, AnalyticsError>> + Send;
}

fn invalid_column(column: &str, reason: impl Into<String>) -> AnalyticsError {
    AnalyticsError::InvalidColumn {
        column: column.to_string(),
        reason: reason.into(),
    }
}

/// Reads a nullable string column. Numbers are rendered as strings.
pub fn optional_string(row: &AnalyticsRow, column: &str) -> Result<Option<String>, AnalyticsError> {
    match row.get(column) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(Value::Number(value)) => Ok(Some(value.to_string())),
        Some(other) => Err(invalid_column(column, format!("expected a string, got {}", other))),
    }
}

/// Reads a non-null string column.
pub fn required_string(row: &AnalyticsRow, column: &str) -> Result<String, AnalyticsError> {
    optional_string(row, column)?.ok_or_else(|| invalid_column(column, "missing value"))
}

/// Reads a nullable numeric column given either as a JSON number or a numeric string.
pub fn optional_f64(row: &AnalyticsRow, column: &str) -> Result<Option<f64>, AnalyticsError> {
    match row.get(column) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(value)) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid_column(column, "number out of range")),
        Some(Value::String(value)) => value
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| invalid_column(column, e.to_string())),
        Some(other) => Err(invalid_column(column, format!("expected a number, got {}", other))),
    }
}

/// Reads an integer column given either as a JSON number or a numeric string.
pub fn required_u64(row: &AnalyticsRow, column: &str) -> Result<u64, AnalyticsError> {
    match row.get(column) {
        Some(Value::Number(value)) => value
            .as_u64()
            .ok_or_else(|| invalid_column(column, "expected a non-negative integer")),
        Some(Value::String(value)) => value
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid_column(column, e.to_string())),
        None | Some(Value::Null) => Err(invalid_column(column, "missing value")),
        Some(other) => Err(invalid_column(column, format!("expected an integer, got {}", other))),
    }
}

/// Reads a `TIMESTAMP` column as epoch seconds.
///
/// Accepts the REST encoding (float seconds, e.g. `"1.7053146E9"`), plain numbers, RFC 3339
/// strings and the `YYYY-MM-DD HH:MM:SS[.f] UTC` text form.
pub fn required_timestamp(row: &AnalyticsRow, column: &str) -> Result<i64, AnalyticsError> {
    match row.get(column) {
        Some(Value::Number(value)) => value
            .as_f64()
            .map(|secs| secs.trunc() as i64)
            .ok_or_else(|| invalid_column(column, "number out of range")),
        Some(Value::String(value)) => parse_timestamp(value.trim())
            .ok_or_else(|| invalid_column(column, format!("unrecognized timestamp {:?}", value))),
        None | Some(Value::Null) => Err(invalid_column(column, "missing value")),
        Some(other) => Err(invalid_column(column, format!("expected a timestamp, got {}", other))),
    }
}

fn parse_timestamp(value: &str) -> Option<i64> {
    if let Ok(secs) = value.parse::<f64>() {
        return Some(secs.trunc() as i64);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.timestamp());
    }
    let naive = value.strip_suffix(" UTC").unwrap_or(value);
    NaiveDateTime::parse_from_str(naive, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|datetime| datetime.and_utc().timestamp())
}
