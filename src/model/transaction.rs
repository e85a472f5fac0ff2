use serde::{Deserialize, Serialize};

/// Payment read from the analytical store.
///
/// `id` mirrors `payment_number`. PII columns are decrypted; company and game names are
/// resolved from the relational store. Columns that are null in the store read as `None`;
/// the link needs both the company and the game id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionEntity {
    pub id: String,
    pub payment_number: String,
    pub company_id: Option<String>,
    pub company_name: Option<String>,
    pub game_id: Option<String>,
    pub game_name: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub billing_email: Option<String>,
    pub billing_address: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub payment_date: String,
    pub transaction_link: Option<String>,
}
