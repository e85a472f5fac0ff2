use serde::{Deserialize, Serialize};

/// Billing/verification account of a company.
///
/// `details` is decrypted; the customer and company names are resolved best-effort and are
/// `None` when the referenced row no longer exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntity {
    pub id: String,
    pub company_id: String,
    pub company_name: Option<String>,
    pub details: Option<String>,
    pub details_version: i32,
    pub edited_by_customer_id: Option<String>,
    pub edited_by_customer_name: Option<String>,
    pub verify_state: String,
    pub verified_by_customer_id: Option<String>,
    pub verified_by_customer_name: Option<String>,
    pub created_at: String,
    pub modified_at: Option<String>,
    pub deleted_at: Option<String>,
    pub archived_at: Option<String>,
    pub company_link: String,
}
