//! Time and date conversion utilities.
//!
//! Stores keep lifecycle timestamps as epoch seconds. Entities surface them as en-US style
//! locale strings in UTC, and date-range filters work on whole calendar days.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::Error;

/// Display format for entity timestamps, e.g. `1/15/2024, 10:30:00 AM`.
pub static LOCALE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Current time as epoch seconds.
pub fn now_epoch() -> i64 {
    Utc::now().timestamp()
}

/// Formats epoch seconds as a locale date string in UTC.
///
/// Values outside the representable range are rendered as the raw number.
pub fn format_timestamp(secs: i64) -> String {
    match DateTime::<Utc>::from_timestamp(secs, 0) {
        Some(datetime) => datetime.format(LOCALE_FORMAT).to_string(),
        None => secs.to_string(),
    }
}

/// [`format_timestamp`] over an optional column.
pub fn format_optional_timestamp(secs: Option<i64>) -> Option<String> {
    secs.map(format_timestamp)
}

/// Parses an ISO date (`2024-01-31`) or an RFC 3339 timestamp and returns its calendar day.
///
/// # Returns
/// - `Ok(NaiveDate)` - The UTC calendar day of the input
/// - `Err(Error::ParseError)` - The input is neither an ISO date nor an RFC 3339 timestamp
pub fn parse_day(value: &str) -> Result<NaiveDate, Error> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(value)
        .map(|datetime| datetime.with_timezone(&Utc).date_naive())
        .map_err(|_| Error::ParseError(format!("Invalid date: {}", value)))
}

/// First second of `day` (00:00:00 UTC) as epoch seconds.
pub fn start_of_day(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .map(|datetime| datetime.and_utc().timestamp())
        .unwrap_or_default()
}

/// Last second of `day` (23:59:59 UTC) as epoch seconds.
pub fn end_of_day(day: NaiveDate) -> i64 {
    start_of_day(day) + 86_399
}
