//! Dashboard deep links.
//!
//! Links follow `{base}/company/{companyId}[/{gameId}][/transactions/{paymentNumber}]`.

/// Builds dashboard URLs from a base URL.
#[derive(Clone, Debug)]
pub struct DashboardLinks {
    base_url: String,
}

impl DashboardLinks {
    /// Creates a link builder; a trailing `/` on `base_url` is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/company/{company_id}`
    pub fn company(&self, company_id: &str) -> String {
        format!("{}/company/{}", self.base_url, company_id)
    }

    /// `{base}/company/{company_id}/{game_id}`
    pub fn game(&self, company_id: &str, game_id: &str) -> String {
        format!("{}/{}", self.company(company_id), game_id)
    }

    /// `{base}/company/{company_id}/{game_id}/transactions/{payment_number}`
    pub fn transaction(&self, company_id: &str, game_id: &str, payment_number: &str) -> String {
        format!(
            "{}/transactions/{}",
            self.game(company_id, game_id),
            payment_number
        )
    }
}
