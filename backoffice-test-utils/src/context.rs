//! Test context returned by [`TestBuilder`](crate::TestBuilder).

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::{constant::TEST_PROJECT_ID, error::TestError};

/// Running test environment: an in-memory SQLite database and a mock analytical store.
///
/// ```ignore
/// let mut test = TestBuilder::new().with_all_tables().build().await?;
///
/// test.store().insert_company("c1", "Acme").await?;
/// test.bigquery().create_payments_count_endpoint(3, 1);
///
/// // run code against `test.db` and `test.analytics_url()`
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Connection to the in-memory SQLite database.
    pub db: DatabaseConnection,

    pub(crate) server: ServerGuard,
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Connects to a fresh in-memory database and starts the mock server.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Empty database and a server with no endpoints
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;

        Ok(Self {
            db,
            server,
            mocks: Vec::new(),
        })
    }

    /// Executes CREATE TABLE statements.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL to point an analytical store client at.
    pub fn analytics_url(&self) -> String {
        self.server.url()
    }

    /// Project id the mock endpoints are registered under.
    pub fn project_id(&self) -> &'static str {
        TEST_PROJECT_ID
    }

    /// Stops enforcing foreign keys so rows can reference deleted parents.
    ///
    /// # Returns
    /// - `Ok(())` - Foreign keys are no longer checked on this connection
    /// - `Err(TestError::DbErr)` - The pragma could not be applied
    pub async fn disable_foreign_keys(&self) -> Result<(), TestError> {
        self.db.execute_unprepared("PRAGMA foreign_keys = OFF").await?;

        Ok(())
    }

    /// Keeps a mock alive for the rest of the test and includes it in [`Self::assert_mocks`].
    pub fn keep_mock(&mut self, mock: Mock) {
        self.mocks.push(mock);
    }

    /// Asserts every registered endpoint was called the expected number of times.
    ///
    /// # Panics
    /// Panics if any endpoint's call count differs from its expectation
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
