//! Test harness for the back-office repositories.
//!
//! Tests are set up in two phases: a [`TestBuilder`] declares tables, rows and mock
//! analytical-store endpoints, and `build()` returns a [`TestContext`] holding the in-memory
//! SQLite connection and the mock server. Fixture helpers on the context insert more rows or
//! register more endpoints while the test runs.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{TEST_DASHBOARD_URL, TEST_ENCRYPTION_KEY, TEST_PROJECT_ID},
        fixtures::{bigquery::PaymentRow, store::factory},
        TestBuilder, TestContext, TestError,
    };
}
