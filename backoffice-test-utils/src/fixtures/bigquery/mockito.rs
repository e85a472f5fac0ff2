//! Mock `jobs.query` endpoints.
//!
//! Page and count queries hit the same URL, so endpoints are told apart by a regex over the
//! request body.

use mockito::{Matcher, Mock};
use serde_json::json;

use crate::{
    constant::TEST_PROJECT_ID,
    fixtures::bigquery::{
        row::{query_response, PAYMENT_COLUMNS},
        BigQueryFixtures, PaymentRow,
    },
};

fn queries_path() -> String {
    format!("/projects/{}/queries", TEST_PROJECT_ID)
}

impl<'a> BigQueryFixtures<'a> {
    /// Create an endpoint answering payment page queries with `rows`.
    ///
    /// # Arguments
    /// - `rows` - Rows to return, in order
    /// - `expected_requests` - Number of times this endpoint should be called
    ///
    /// # Returns
    /// - `Mock` - The created mock endpoint
    pub fn create_payments_page_endpoint(
        &mut self,
        rows: Vec<PaymentRow>,
        expected_requests: usize,
    ) -> Mock {
        let rows = rows.iter().map(PaymentRow::cells).collect();

        self.setup
            .server
            .mock("POST", queries_path().as_str())
            .match_body(Matcher::Regex("ORDER BY payment_date DESC".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(query_response(&PAYMENT_COLUMNS, rows).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create an endpoint answering payment count queries with `total`.
    pub fn create_payments_count_endpoint(&mut self, total: u64, expected_requests: usize) -> Mock {
        let rows = vec![json!({ "f": [{ "v": total.to_string() }] })];

        self.setup
            .server
            .mock("POST", queries_path().as_str())
            .match_body(Matcher::Regex(r"COUNT\(\*\) AS total".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(query_response(&["total"], rows).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create an endpoint rejecting every query with `status` and `message`.
    pub fn create_query_error_endpoint(
        &mut self,
        status: usize,
        message: &str,
        expected_requests: usize,
    ) -> Mock {
        let body = json!({
            "error": { "code": status, "message": message, "status": "INVALID_ARGUMENT" }
        });

        self.setup
            .server
            .mock("POST", queries_path().as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }
}
