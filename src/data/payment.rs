//! Payments in the analytical store.
//!
//! The page and count queries are rendered from one [`PaymentCondition`], so both see the
//! same `WHERE` text and the same named parameters.

use crate::{
    analytics::{required_u64, AnalyticsClient, AnalyticsQuery, AnalyticsRow, QueryParameter},
    error::analytics::AnalyticsError,
    data::escape_like,
    model::{filter::DateRange, PageRequest},
};

/// Fully qualified payments table.
pub static PAYMENTS_TABLE: &str = "events.payments";

/// `WHERE` clause for payment queries plus the parameters it binds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentCondition {
    clauses: Vec<String>,
    params: Vec<QueryParameter>,
}

impl PaymentCondition {
    /// Matches every payment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Literal substring match on user id or payment number, or exact match of the stored
    /// user name or billing e-mail. Wildcards in `term` are escaped with a backslash, the
    /// default `LIKE` escape of the analytical store.
    ///
    /// # Arguments
    /// - `term` - Search term as typed
    /// - `encrypted_term` - `term` encrypted with the scheme used for payment PII
    pub fn search(mut self, term: &str, encrypted_term: String) -> Self {
        self.clauses.push(
            "(user_id LIKE @search_pattern OR payment_number LIKE @search_pattern \
             OR billing_email = @search_encrypted OR user_name = @search_encrypted)"
                .to_string(),
        );
        self.params
            .push(QueryParameter::string("search_pattern", format!("%{}%", escape_like(term))));
        self.params
            .push(QueryParameter::string("search_encrypted", encrypted_term));
        self
    }

    /// Payments made within the range, both bounds inclusive.
    pub fn payment_date_within(mut self, range: &DateRange) -> Self {
        self.clauses.push(
            "payment_date BETWEEN TIMESTAMP_SECONDS(@date_from) AND TIMESTAMP_SECONDS(@date_to)"
                .to_string(),
        );
        self.params.push(QueryParameter::int64("date_from", range.start));
        self.params.push(QueryParameter::int64("date_to", range.end));
        self
    }

    pub fn company_id(self, company_id: &str) -> Self {
        self.equals("company_id", company_id)
    }

    pub fn game_id(self, game_id: &str) -> Self {
        self.equals("game_id", game_id)
    }

    pub fn status(self, status: &str) -> Self {
        self.equals("status", status)
    }

    pub fn payment_number(self, payment_number: &str) -> Self {
        self.equals("payment_number", payment_number)
    }

    fn equals(mut self, column: &str, value: &str) -> Self {
        self.clauses.push(format!("{} = @{}", column, column));
        self.params.push(QueryParameter::string(column, value));
        self
    }

    /// The `WHERE` text; `TRUE` when there are no constraints.
    pub fn render(&self) -> String {
        if self.clauses.is_empty() {
            "TRUE".to_string()
        } else {
            self.clauses.join(" AND ")
        }
    }

    pub fn params(&self) -> &[QueryParameter] {
        &self.params
    }

    /// `SELECT *` page query, newest payments first.
    pub fn page_query(&self, page: PageRequest) -> AnalyticsQuery {
        let sql = format!(
            "SELECT * FROM {} WHERE {} ORDER BY payment_date DESC LIMIT @pageSize OFFSET @offset",
            PAYMENTS_TABLE,
            self.render()
        );

        let mut params = self.params.clone();
        params.push(QueryParameter::int64("pageSize", saturating_i64(page.take())));
        params.push(QueryParameter::int64("offset", saturating_i64(page.skip())));

        AnalyticsQuery::new(sql, params)
    }

    /// `COUNT(*)` query over the same condition.
    pub fn count_query(&self) -> AnalyticsQuery {
        let sql = format!(
            "SELECT COUNT(*) AS total FROM {} WHERE {}",
            PAYMENTS_TABLE,
            self.render()
        );

        AnalyticsQuery::new(sql, self.params.clone())
    }
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub struct PaymentRepository<'a, A: AnalyticsClient> {
    client: &'a A,
}

impl<'a, A: AnalyticsClient> PaymentRepository<'a, A> {
    pub fn new(client: &'a A) -> Self {
        Self { client }
    }

    pub async fn find_page(
        &self,
        condition: &PaymentCondition,
        page: PageRequest,
    ) -> Result<Vec<AnalyticsRow>, AnalyticsError> {
        self.client.query(&condition.page_query(page)).await
    }

    /// Counts matching payments; an empty result counts as zero.
    pub async fn count(&self, condition: &PaymentCondition) -> Result<u64, AnalyticsError> {
        let rows = self.client.query(&condition.count_query()).await?;

        match rows.first() {
            Some(row) => required_u64(row, "total"),
            None => Ok(0),
        }
    }

    pub async fn find_by_payment_number(
        &self,
        payment_number: &str,
    ) -> Result<Vec<AnalyticsRow>, AnalyticsError> {
        let condition = PaymentCondition::new().payment_number(payment_number);

        self.client.query(&condition.page_query(PageRequest::new(1, 1))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::ParameterValue;

    #[test]
    fn empty_condition_renders_true() {
        let query = PaymentCondition::new().count_query();

        assert_eq!(query.sql, "SELECT COUNT(*) AS total FROM events.payments WHERE TRUE");
        assert!(query.params.is_empty());
    }

    #[test]
    fn page_and_count_share_condition() {
        let condition = PaymentCondition::new()
            .search("p-10", "ENCRYPTED".to_string())
            .company_id("c1")
            .status("paid");

        let page = condition.page_query(PageRequest::new(3, 20));
        let count = condition.count_query();

        let where_clause = "(user_id LIKE @search_pattern OR payment_number LIKE @search_pattern \
             OR billing_email = @search_encrypted OR user_name = @search_encrypted) \
             AND company_id = @company_id AND status = @status";
        assert_eq!(
            page.sql,
            format!(
                "SELECT * FROM events.payments WHERE {} ORDER BY payment_date DESC LIMIT @pageSize OFFSET @offset",
                where_clause
            )
        );
        assert_eq!(
            count.sql,
            format!("SELECT COUNT(*) AS total FROM events.payments WHERE {}", where_clause)
        );
        assert_eq!(&page.params[..count.params.len()], &count.params[..]);
        assert_eq!(page.param("offset"), Some(&ParameterValue::Int64(40)));
        assert_eq!(page.param("pageSize"), Some(&ParameterValue::Int64(20)));
        assert_eq!(
            page.param("search_pattern"),
            Some(&ParameterValue::String("%p-10%".to_string()))
        );
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        let query = PaymentCondition::new()
            .search("50%_off\\", "ENCRYPTED".to_string())
            .count_query();

        assert_eq!(
            query.param("search_pattern"),
            Some(&ParameterValue::String("%50\\%\\_off\\\\%".to_string()))
        );
        assert_eq!(
            query.param("search_encrypted"),
            Some(&ParameterValue::String("ENCRYPTED".to_string()))
        );
    }

    #[test]
    fn date_range_binds_epoch_seconds() {
        let range = DateRange::parse("2024-01-01", "2024-01-01").unwrap();
        let query = PaymentCondition::new().payment_date_within(&range).count_query();

        assert!(query
            .sql
            .ends_with("WHERE payment_date BETWEEN TIMESTAMP_SECONDS(@date_from) AND TIMESTAMP_SECONDS(@date_to)"));
        assert_eq!(query.param("date_from"), Some(&ParameterValue::Int64(1_704_067_200)));
        assert_eq!(query.param("date_to"), Some(&ParameterValue::Int64(1_704_153_599)));
    }
}
