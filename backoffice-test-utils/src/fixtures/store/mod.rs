use crate::TestContext;

pub mod data;
pub mod factory;

impl TestContext {
    /// Relational fixture helpers.
    pub fn store<'a>(&'a mut self) -> StoreFixtures<'a> {
        StoreFixtures { setup: self }
    }
}

pub struct StoreFixtures<'a> {
    pub setup: &'a mut TestContext,
}
