//! Constants shared by every test setup.
//!
//! These are not real credentials.

/// 16-byte secret, valid for both cipher schemes.
pub static TEST_ENCRYPTION_KEY: &str = "0123456789abcdef";

/// Dashboard base URL used to build expected links.
pub static TEST_DASHBOARD_URL: &str = "https://dashboard.test";

/// Cloud project the mock analytical store answers for.
pub static TEST_PROJECT_ID: &str = "test-project";

/// Creation timestamp given to fixture rows: 2024-01-01T00:00:00Z.
pub const TEST_CREATED_AT: i64 = 1_704_067_200;
