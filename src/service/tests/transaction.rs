//! Tests for TransactionService.

use std::sync::Mutex;

use serde_json::json;

use super::*;
use crate::{
    analytics::{AnalyticsClient, AnalyticsQuery, AnalyticsRow, ParameterValue},
    crypto::{
        field::{PAYMENT_BILLING_EMAIL, PAYMENT_USER_NAME},
        FieldCipher,
    },
    error::{analytics::AnalyticsError, Error},
    model::filter::{DateRange, TransactionFilter},
    service::transaction::TransactionService,
};

/// Records every query and answers counts with `total`, pages with no rows.
struct RecordingClient {
    total: u64,
    queries: Mutex<Vec<AnalyticsQuery>>,
}

impl RecordingClient {
    fn new(total: u64) -> Self {
        Self {
            total,
            queries: Mutex::new(Vec::new()),
        }
    }

    fn queries(&self) -> Vec<AnalyticsQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl AnalyticsClient for RecordingClient {
    async fn query(&self, query: &AnalyticsQuery) -> Result<Vec<AnalyticsRow>, AnalyticsError> {
        self.queries.lock().unwrap().push(query.clone());

        if query.sql.contains("COUNT(*)") {
            let mut row = AnalyticsRow::new();
            row.insert("total".to_string(), json!(self.total.to_string()));
            Ok(vec![row])
        } else {
            Ok(Vec::new())
        }
    }
}

/// Expect payments joined with company and game names from the relational store
#[tokio::test]
async fn get_page_joins_relational_names() -> Result<(), TestError> {
    let cipher = FieldCipher::new(Some(TEST_ENCRYPTION_KEY));
    let rows = vec![
        PaymentRow::new("p-2", "c1", "g1")
            .with_user("u1", Some(cipher.encrypt_field(PAYMENT_USER_NAME, "Ada")))
            .with_billing(
                Some(cipher.encrypt_field(PAYMENT_BILLING_EMAIL, "a@x.com")),
                None,
            )
            .with_payment_date(1_705_314_600),
        PaymentRow::new("p-1", "c1", "gone").with_amount("0.5"),
    ];
    let test = TestBuilder::new()
        .with_all_tables()
        .with_company("c1", "Acme")
        .with_game("g1", "c1", "Space Miner")
        .with_payments_page_endpoint(rows, 1)
        .with_payments_count_endpoint(42, 1)
        .build()
        .await?;
    let state = app_state(&test);

    let page = TransactionService::new(&state)
        .get_by_filter(1, 2, &TransactionFilter::default())
        .await;

    assert!(page.is_ok(), "Error: {:?}", page);
    let page = page.unwrap();
    assert_eq!(page.total, 42);
    assert_eq!(page.data.len(), 2);

    let first = &page.data[0];
    assert_eq!(first.payment_number, "p-2");
    assert_eq!(first.company_name.as_deref(), Some("Acme"));
    assert_eq!(first.game_name.as_deref(), Some("Space Miner"));
    assert_eq!(first.user_name.as_deref(), Some("Ada"));
    assert_eq!(first.billing_email.as_deref(), Some("a@x.com"));
    assert_eq!(first.billing_address, None);
    assert_eq!(first.payment_date, "1/15/2024, 10:30:00 AM");
    assert_eq!(
        first.transaction_link.as_deref(),
        Some("https://dashboard.test/company/c1/g1/transactions/p-2")
    );

    let second = &page.data[1];
    assert_eq!(second.game_name, None);
    assert_eq!(second.amount, Some(0.5));

    test.assert_mocks();

    Ok(())
}

/// Expect a row with null company and amount to map with those fields absent
#[tokio::test]
async fn null_cells_do_not_fail_the_page() -> Result<(), TestError> {
    let rows = vec![
        PaymentRow::new("p-2", "c1", "g1"),
        PaymentRow::new("p-1", "c1", "g1").with_missing_company_and_amount(),
    ];
    let test = TestBuilder::new()
        .with_all_tables()
        .with_company("c1", "Acme")
        .with_game("g1", "c1", "Space Miner")
        .with_payments_page_endpoint(rows, 1)
        .with_payments_count_endpoint(2, 1)
        .build()
        .await?;
    let state = app_state(&test);

    let page = TransactionService::new(&state)
        .get_by_filter(1, 10, &TransactionFilter::default())
        .await;

    assert!(page.is_ok(), "Error: {:?}", page);
    let page = page.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].company_name.as_deref(), Some("Acme"));
    assert_eq!(page.data[0].amount, Some(9.99));

    let partial = &page.data[1];
    assert_eq!(partial.payment_number, "p-1");
    assert_eq!(partial.company_id, None);
    assert_eq!(partial.company_name, None);
    assert_eq!(partial.game_name.as_deref(), Some("Space Miner"));
    assert_eq!(partial.amount, None);
    assert_eq!(partial.transaction_link, None);

    test.assert_mocks();

    Ok(())
}

/// Expect page and count queries built from the same condition and parameters
#[tokio::test]
async fn page_and_count_share_filter() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let state = app_state(&test);
    let client = RecordingClient::new(7);

    let filter = TransactionFilter {
        selected_fields: Some("a@x.com".to_string()),
        company_id: Some("c1".to_string()),
        status: Some("paid".to_string()),
        payment_date: Some(DateRange::parse("2024-01-01", "2024-01-31").unwrap()),
        ..Default::default()
    };
    let page = TransactionService::with_client(&state, &client)
        .get_by_filter(2, 25, &filter)
        .await;

    assert!(page.is_ok(), "Error: {:?}", page);
    let page = page.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total, 7);

    let queries = client.queries();
    assert_eq!(queries.len(), 2);
    let (page_query, count_query) = if queries[0].sql.contains("COUNT(*)") {
        (&queries[1], &queries[0])
    } else {
        (&queries[0], &queries[1])
    };

    let where_of = |sql: &str| {
        let start = sql.find(" WHERE ").unwrap() + " WHERE ".len();
        let end = sql.find(" ORDER BY ").unwrap_or(sql.len());
        sql[start..end].to_string()
    };
    assert_eq!(where_of(&page_query.sql), where_of(&count_query.sql));
    assert_eq!(&page_query.params[..count_query.params.len()], &count_query.params[..]);
    assert_eq!(page_query.param("offset"), Some(&ParameterValue::Int64(25)));

    let encrypted = FieldCipher::new(Some(TEST_ENCRYPTION_KEY))
        .encrypt_field(PAYMENT_BILLING_EMAIL, "a@x.com");
    assert_eq!(
        count_query.param("search_encrypted"),
        Some(&ParameterValue::String(encrypted))
    );

    Ok(())
}

/// Expect an unknown payment number to yield an empty result rather than an error
#[tokio::test]
async fn get_by_id_unknown_is_empty() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .with_payments_page_endpoint(Vec::new(), 1)
        .build()
        .await?;
    let state = app_state(&test);

    let result = TransactionService::new(&state).get_by_id("p-404").await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert!(result.unwrap().is_empty());
    test.assert_mocks();

    Ok(())
}

/// Expect a rejected query to surface as a wrapped retrieval failure
#[tokio::test]
async fn rejected_query_is_retrieve_failed() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_all_tables().build().await?;
    let mock = test
        .bigquery()
        .create_query_error_endpoint(400, "Unrecognized name: foo", 1);
    test.keep_mock(mock);
    let state = app_state(&test);

    let result = TransactionService::new(&state).get_by_id("p-1").await;

    let err = result.expect_err("rejected query should fail");
    assert_eq!(
        err.to_string(),
        "Failed to retrieve Transaction data for payment number p-1"
    );
    match err {
        Error::RetrieveFailed { source, .. } => assert!(matches!(
            *source,
            Error::AnalyticsError(AnalyticsError::QueryRejected { status: 400, .. })
        )),
        other => panic!("unexpected error: {:?}", other),
    }
    test.assert_mocks();

    Ok(())
}
