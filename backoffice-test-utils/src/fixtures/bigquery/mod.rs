use crate::TestContext;

pub mod mockito;
pub mod row;

pub use row::PaymentRow;

impl TestContext {
    /// Mock analytical store helpers.
    pub fn bigquery<'a>(&'a mut self) -> BigQueryFixtures<'a> {
        BigQueryFixtures { setup: self }
    }
}

pub struct BigQueryFixtures<'a> {
    pub setup: &'a mut TestContext,
}
