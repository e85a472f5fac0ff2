//! Fixtures for the test database and the mock analytical store.
//!
//! - `store` - relational rows (companies, customers, memberships, accounts, games, users, settings)
//! - `bigquery` - payment rows and `jobs.query` endpoints

pub mod bigquery;
pub mod store;
