//! Entity repositories for the analytics and admin back office.
//!
//! The crate reads back-office entities from two stores, a relational store accessed
//! through SeaORM and an analytical store queried with parameterized SQL, decrypts PII
//! fields, resolves foreign keys to display names and returns paginated, link-enriched
//! domain entities.

pub mod analytics;
pub mod config;
pub mod crypto;
pub mod data;
pub mod error;
pub mod model;
pub mod service;
pub mod startup;
pub mod util;
