//! Typed filter DTOs, validated when they are deserialized.
//!
//! Each service accepts its own filter type. Blank search terms are ignored and date ranges
//! are converted to inclusive epoch-second bounds covering whole UTC calendar days.

use serde::Deserialize;

use crate::{
    error::Error,
    util::time::{end_of_day, parse_day, start_of_day},
};

/// Inclusive epoch-second range covering whole UTC days.
///
/// Deserializes from a `[start, end]` pair of ISO dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "[String; 2]")]
pub struct DateRange {
    /// 00:00:00 of the first day.
    pub start: i64,
    /// 23:59:59 of the last day.
    pub end: i64,
}

impl DateRange {
    /// Parses a `[start, end]` pair of ISO dates into epoch-second bounds.
    ///
    /// # Returns
    /// - `Ok(DateRange)` - Bounds from 00:00:00 of `start` to 23:59:59 of `end`
    /// - `Err(Error::ParseError)` - A date is malformed or `end` is before `start`
    pub fn parse(start: &str, end: &str) -> Result<Self, Error> {
        let start_day = parse_day(start)?;
        let end_day = parse_day(end)?;

        if end_day < start_day {
            return Err(Error::ParseError(format!(
                "Date range ends ({}) before it starts ({})",
                end_day, start_day
            )));
        }

        Ok(Self {
            start: start_of_day(start_day),
            end: end_of_day(end_day),
        })
    }
}

impl TryFrom<[String; 2]> for DateRange {
    type Error = Error;

    fn try_from([start, end]: [String; 2]) -> Result<Self, Self::Error> {
        Self::parse(&start, &end)
    }
}

/// Account verification state filter; `"ALL"` disables the constraint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum VerifyStateFilter {
    /// Any state.
    All,
    /// Exactly this state.
    Only(String),
}

impl From<String> for VerifyStateFilter {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("ALL") {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

/// Filter for companies.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyFilter {
    /// Free-text search over id and name.
    pub selected_fields: Option<String>,
    /// Only companies this customer is a member of.
    pub customer_id: Option<String>,
    /// Creation date range.
    #[serde(alias = "created_at")]
    pub created_at: Option<DateRange>,
}

/// Filter for accounts.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountFilter {
    /// Free-text search over id and company id.
    pub selected_fields: Option<String>,
    /// Only accounts of this company.
    pub company_id: Option<String>,
    /// Verification state.
    #[serde(alias = "verify_state")]
    pub verify_state: Option<VerifyStateFilter>,
    /// Creation date range.
    #[serde(alias = "created_at")]
    pub created_at: Option<DateRange>,
}

/// Filter for games.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameFilter {
    /// Free-text search over id, name and company id.
    pub selected_fields: Option<String>,
    /// Only games of this company.
    pub company_id: Option<String>,
    /// Only games of companies this customer is a member of.
    pub customer_id: Option<String>,
    /// Creation date range.
    #[serde(alias = "created_at")]
    pub created_at: Option<DateRange>,
}

/// Filter for users.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserFilter {
    /// Free-text search over id, sub and player id, or an exact name/e-mail match.
    pub selected_fields: Option<String>,
    /// Only users of this game.
    pub game_id: Option<String>,
    /// Only users of games owned by this company.
    pub company_id: Option<String>,
    /// Only banned (`true`) or not banned (`false`) users.
    pub banned: Option<bool>,
    /// Creation date range.
    #[serde(alias = "created_at")]
    pub created_at: Option<DateRange>,
}

/// Filter for payment transactions.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionFilter {
    /// Substring of user id or payment number, or an exact user name/billing e-mail.
    pub selected_fields: Option<String>,
    /// Only payments of this company.
    pub company_id: Option<String>,
    /// Only payments of this game.
    pub game_id: Option<String>,
    /// Only payments in this status.
    pub status: Option<String>,
    /// Payment date range.
    #[serde(alias = "payment_date")]
    pub payment_date: Option<DateRange>,
}

/// Trims a text filter value, treating blank input as absent.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_day_range_is_inclusive_through_last_second() {
        let range = DateRange::parse("2024-01-01", "2024-01-01").unwrap();

        assert_eq!(range.start, 1_704_067_200);
        assert_eq!(range.end, 1_704_153_599);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let result = DateRange::parse("2024-02-01", "2024-01-01");

        assert!(matches!(result, Err(Error::ParseError(_))));
    }

    #[test]
    fn deserializes_loose_filter_object() {
        let filter: UserFilter = serde_json::from_value(serde_json::json!({
            "selectedFields": "  a@x.com ",
            "created_at": ["2024-01-01", "2024-01-31"],
        }))
        .unwrap();

        assert_eq!(non_blank(&filter.selected_fields), Some("a@x.com"));
        assert_eq!(
            filter.created_at,
            Some(DateRange::parse("2024-01-01", "2024-01-31").unwrap())
        );
        assert_eq!(filter.game_id, None);
    }

    #[test]
    fn rejects_malformed_dates_at_the_boundary() {
        let result: Result<GameFilter, _> = serde_json::from_value(serde_json::json!({
            "createdAt": ["2024-01-01", "not a date"],
        }));

        assert!(result.is_err());
    }

    #[test]
    fn blank_values_are_ignored() {
        assert_eq!(non_blank(&Some("   ".to_string())), None);
        assert_eq!(non_blank(&None), None);
    }

    #[test]
    fn verify_state_all_disables_constraint() {
        let filter: AccountFilter = serde_json::from_value(serde_json::json!({
            "verifyState": "ALL",
        }))
        .unwrap();
        assert_eq!(filter.verify_state, Some(VerifyStateFilter::All));

        let filter: AccountFilter = serde_json::from_value(serde_json::json!({
            "verify_state": "verified",
        }))
        .unwrap();
        assert_eq!(
            filter.verify_state,
            Some(VerifyStateFilter::Only("verified".to_string()))
        );
    }
}
