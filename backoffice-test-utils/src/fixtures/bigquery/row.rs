//! Payment rows served by the mock analytical store.

use serde_json::{json, Value};

use crate::constant::TEST_CREATED_AT;

/// Columns of `events.payments`, in response order.
pub static PAYMENT_COLUMNS: [&str; 11] = [
    "payment_number",
    "company_id",
    "game_id",
    "user_id",
    "user_name",
    "billing_email",
    "billing_address",
    "amount",
    "currency",
    "status",
    "payment_date",
];

/// One `events.payments` row. PII columns are stored as given, so pass ciphertext.
#[derive(Clone, Debug)]
pub struct PaymentRow {
    pub payment_number: String,
    pub company_id: Option<String>,
    pub game_id: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub billing_email: Option<String>,
    pub billing_address: Option<String>,
    pub amount: Option<String>,
    pub currency: String,
    pub status: String,
    pub payment_date: i64,
}

impl PaymentRow {
    /// A paid 9.99 USD payment made at [`TEST_CREATED_AT`] without user or billing data.
    pub fn new(payment_number: &str, company_id: &str, game_id: &str) -> Self {
        Self {
            payment_number: payment_number.to_string(),
            company_id: Some(company_id.to_string()),
            game_id: Some(game_id.to_string()),
            user_id: None,
            user_name: None,
            billing_email: None,
            billing_address: None,
            amount: Some("9.99".to_string()),
            currency: "USD".to_string(),
            status: "paid".to_string(),
            payment_date: TEST_CREATED_AT,
        }
    }

    pub fn with_user(mut self, user_id: &str, user_name: Option<String>) -> Self {
        self.user_id = Some(user_id.to_string());
        self.user_name = user_name;
        self
    }

    pub fn with_billing(mut self, email: Option<String>, address: Option<String>) -> Self {
        self.billing_email = email;
        self.billing_address = address;
        self
    }

    pub fn with_amount(mut self, amount: &str) -> Self {
        self.amount = Some(amount.to_string());
        self
    }

    /// Null `company_id` and `amount`, as left behind by partially ingested events.
    pub fn with_missing_company_and_amount(mut self) -> Self {
        self.company_id = None;
        self.amount = None;
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn with_payment_date(mut self, payment_date: i64) -> Self {
        self.payment_date = payment_date;
        self
    }

    /// Cells in [`PAYMENT_COLUMNS`] order, encoded the way the REST API encodes them.
    pub fn cells(&self) -> Value {
        let cell = |value: Option<&String>| match value {
            Some(value) => json!({ "v": value }),
            None => json!({ "v": null }),
        };

        json!({
            "f": [
                cell(Some(&self.payment_number)),
                cell(self.company_id.as_ref()),
                cell(self.game_id.as_ref()),
                cell(self.user_id.as_ref()),
                cell(self.user_name.as_ref()),
                cell(self.billing_email.as_ref()),
                cell(self.billing_address.as_ref()),
                cell(self.amount.as_ref()),
                cell(Some(&self.currency)),
                cell(Some(&self.status)),
                // TIMESTAMP cells are float seconds in scientific notation
                json!({ "v": format!("{:E}", self.payment_date as f64) }),
            ]
        })
    }
}

/// Response body for a successful query returning `rows`.
pub fn query_response(fields: &[&str], rows: Vec<Value>) -> Value {
    let fields: Vec<Value> = fields.iter().map(|name| json!({ "name": name })).collect();

    json!({
        "kind": "bigquery#queryResponse",
        "jobComplete": true,
        "totalRows": rows.len().to_string(),
        "schema": { "fields": fields },
        "rows": rows,
    })
}
