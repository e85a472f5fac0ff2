//! Shared setup for service tests.

use std::time::Duration;

use backoffice_test_utils::{
    constant::{TEST_DASHBOARD_URL, TEST_ENCRYPTION_KEY},
    TestContext,
};

use crate::{
    analytics::BigQueryClient, config::AnalyticsConfig, crypto::FieldCipher,
    model::app::AppState, util::link::DashboardLinks,
};

/// Builds an [`AppState`] wired to the test database and mock analytical store.
pub fn app_state(test: &TestContext) -> AppState {
    let analytics = BigQueryClient::new(&AnalyticsConfig {
        project_id: test.project_id().to_string(),
        api_url: test.analytics_url(),
        access_token: None,
        timeout: Duration::from_secs(5),
    })
    .expect("analytics client should build");

    AppState {
        db: test.db.clone(),
        analytics,
        cipher: FieldCipher::new(Some(TEST_ENCRYPTION_KEY)),
        links: DashboardLinks::new(TEST_DASHBOARD_URL),
    }
}
