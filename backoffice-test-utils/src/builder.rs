//! Declarative test builder.
//!
//! Configuration methods queue work; `build()` creates the tables, inserts the rows and
//! registers the mock endpoints in that order.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, DbBackend, EntityTrait, Schema};

use crate::{error::TestError, fixtures::bigquery::PaymentRow, TestContext};

/// Builder for a [`TestContext`].
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_all_tables: bool,

    companies: Vec<(String, String)>,
    customers: Vec<(String, String)>,
    memberships: Vec<(String, String)>, // (company_id, customer_id)
    games: Vec<(String, String, String)>, // (game_id, company_id, name)

    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,
    payments_page_endpoints: Vec<(Vec<PaymentRow>, usize)>,
    payments_count_endpoints: Vec<(u64, usize)>,
}

impl TestBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_all_tables: false,
            companies: Vec::new(),
            customers: Vec::new(),
            memberships: Vec::new(),
            games: Vec::new(),
            mock_builders: Vec::new(),
            payments_page_endpoints: Vec::new(),
            payments_count_endpoints: Vec::new(),
        }
    }

    /// Create every back-office table, parents first.
    pub fn with_all_tables(mut self) -> Self {
        self.include_all_tables = true;
        self
    }

    /// Add a single entity table.
    ///
    /// # Arguments
    /// - `entity` - Entity type implementing `EntityTrait`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use backoffice_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), backoffice_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Company)
    ///     .with_table(Game)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a company.
    pub fn with_company(mut self, id: &str, name: &str) -> Self {
        self.companies.push((id.to_string(), name.to_string()));
        self
    }

    /// Insert a customer.
    pub fn with_customer(mut self, id: &str, name: &str) -> Self {
        self.customers.push((id.to_string(), name.to_string()));
        self
    }

    /// Make a customer a member of a company; missing parents are created.
    pub fn with_membership(mut self, company_id: &str, customer_id: &str) -> Self {
        self.memberships
            .push((company_id.to_string(), customer_id.to_string()));
        self
    }

    /// Insert a game; a missing company is created.
    pub fn with_game(mut self, id: &str, company_id: &str, name: &str) -> Self {
        self.games
            .push((id.to_string(), company_id.to_string(), name.to_string()));
        self
    }

    /// Serve payment page queries with `rows`.
    ///
    /// # Arguments
    /// - `rows` - Rows returned for every page query
    /// - `expected_requests` - Number of times the endpoint should be called
    pub fn with_payments_page_endpoint(
        mut self,
        rows: Vec<PaymentRow>,
        expected_requests: usize,
    ) -> Self {
        self.payments_page_endpoints.push((rows, expected_requests));
        self
    }

    /// Serve payment count queries with `total`.
    pub fn with_payments_count_endpoint(mut self, total: u64, expected_requests: usize) -> Self {
        self.payments_count_endpoints.push((total, expected_requests));
        self
    }

    /// Add a custom mock endpoint.
    ///
    /// # Arguments
    /// - `setup` - Closure that receives the mock server and returns a configured Mock
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Tables created, rows inserted and endpoints registered
    /// - `Err(TestError::DbErr)` - Table creation or row insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_all_tables {
            let schema = Schema::new(DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Company),
                schema.create_table_from_entity(entity::prelude::Customer),
                schema.create_table_from_entity(entity::prelude::CompanyMember),
                schema.create_table_from_entity(entity::prelude::Account),
                schema.create_table_from_entity(entity::prelude::Game),
                schema.create_table_from_entity(entity::prelude::User),
                schema.create_table_from_entity(entity::prelude::Settings),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert rows
        for (id, name) in self.companies {
            setup.store().insert_company(&id, &name).await?;
        }

        for (id, name) in self.customers {
            setup.store().insert_customer(&id, &name).await?;
        }

        for (company_id, customer_id) in self.memberships {
            setup
                .store()
                .insert_membership(&company_id, &customer_id)
                .await?;
        }

        for (id, company_id, name) in self.games {
            setup.store().insert_game(&id, &company_id, &name).await?;
        }

        // 3. Create mock endpoints, custom ones first so they take precedence
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for (rows, expected) in self.payments_page_endpoints {
            mocks.push(
                setup
                    .bigquery()
                    .create_payments_page_endpoint(rows, expected),
            );
        }

        for (total, expected) in self.payments_count_endpoints {
            mocks.push(
                setup
                    .bigquery()
                    .create_payments_count_endpoint(total, expected),
            );
        }

        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
