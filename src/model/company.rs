use serde::{Deserialize, Serialize};

/// Company as shown in the back office.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyEntity {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    pub size: Option<String>,
    pub domains: Vec<String>,
    pub viewer_domains: Vec<String>,
    pub logo_url: Option<String>,
    pub created_at: String,
    pub modified_at: Option<String>,
    pub deleted_at: Option<String>,
    pub archived_at: Option<String>,
    /// Dashboard page of the company.
    pub company_link: String,
}

/// Id and display name of a company, used for pickers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyName {
    pub id: String,
    pub name: String,
}
