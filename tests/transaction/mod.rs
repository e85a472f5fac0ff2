use backoffice::{
    crypto::{field::PAYMENT_BILLING_ADDRESS, FieldCipher},
    model::filter::TransactionFilter,
    service::{company::CompanyService, transaction::TransactionService},
};
use backoffice_test_utils::prelude::*;

use crate::util::test_state;

/// A payment's company link matches the link the company service builds for the same company
#[tokio::test]
async fn transaction_links_line_up_with_company() -> Result<(), TestError> {
    let cipher = FieldCipher::new(Some(TEST_ENCRYPTION_KEY));
    let row = PaymentRow::new("p-100", "c1", "g1")
        .with_billing(None, Some(cipher.encrypt_field(PAYMENT_BILLING_ADDRESS, "1 Main St")))
        .with_status("refunded");
    let test = TestBuilder::new()
        .with_all_tables()
        .with_company("c1", "Acme")
        .with_game("g1", "c1", "Space Miner")
        .with_payments_page_endpoint(vec![row], 1)
        .build()
        .await?;
    let state = test_state(&test);

    let transactions = TransactionService::new(&state)
        .get_by_payment_number("p-100")
        .await;
    let companies = CompanyService::new(&state).get_by_id("c1").await;

    assert!(transactions.is_ok(), "Error: {:?}", transactions);
    assert!(companies.is_ok(), "Error: {:?}", companies);
    let transactions = transactions.unwrap();
    let companies = companies.unwrap();

    assert_eq!(transactions.len(), 1);
    let transaction = &transactions[0];
    assert_eq!(transaction.id, "p-100");
    assert_eq!(transaction.status.as_deref(), Some("refunded"));
    assert_eq!(transaction.billing_address.as_deref(), Some("1 Main St"));
    assert_eq!(transaction.company_name.as_deref(), Some(companies[0].name.as_str()));
    let transaction_link = transaction
        .transaction_link
        .as_deref()
        .expect("payment with company and game ids should have a link");
    assert!(transaction_link.starts_with(&companies[0].company_link));

    test.assert_mocks();

    Ok(())
}

/// An empty analytical result still answers with a zero total
#[tokio::test]
async fn empty_payment_page() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .with_payments_page_endpoint(Vec::new(), 1)
        .with_payments_count_endpoint(0, 1)
        .build()
        .await?;
    let state = test_state(&test);

    let filter = TransactionFilter {
        game_id: Some("g1".to_string()),
        ..Default::default()
    };
    let page = TransactionService::new(&state)
        .get_by_filter(1, 20, &filter)
        .await;

    assert!(page.is_ok(), "Error: {:?}", page);
    let page = page.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total, 0);

    test.assert_mocks();

    Ok(())
}
