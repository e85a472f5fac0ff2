use std::time::Duration;

use backoffice::{
    analytics::BigQueryClient, config::AnalyticsConfig, crypto::FieldCipher,
    model::app::AppState, util::link::DashboardLinks,
};
use backoffice_test_utils::prelude::*;

/// Returns an [`AppState`] pointed at the test database and mock analytical store
pub fn test_state(test: &TestContext) -> AppState {
    let analytics = BigQueryClient::new(&AnalyticsConfig {
        project_id: test.project_id().to_string(),
        api_url: test.analytics_url(),
        access_token: Some("test-token".to_string()),
        timeout: Duration::from_secs(5),
    })
    .expect("Failed to build analytics client");

    AppState {
        db: test.db.clone(),
        analytics,
        cipher: FieldCipher::new(Some(TEST_ENCRYPTION_KEY)),
        links: DashboardLinks::new(TEST_DASHBOARD_URL),
    }
}
