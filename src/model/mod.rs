//! Domain entities, pagination types and filter DTOs.
//!
//! Entities are read-only snapshots built per request by the services' row mappers: PII is
//! already decrypted, foreign keys carry resolved display names where known, timestamps are
//! locale strings and every entity carries its dashboard deep link.

pub mod account;
pub mod app;
pub mod company;
pub mod filter;
pub mod game;
pub mod settings;
pub mod transaction;
pub mod user;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity families exposed by the services, used in error messages and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// [`account::AccountEntity`]
    Account,
    /// [`company::CompanyEntity`]
    Company,
    /// [`game::GameEntity`]
    Game,
    /// [`user::UserEntity`]
    User,
    /// [`transaction::TransactionEntity`]
    Transaction,
    /// [`settings::SettingsEntity`]
    Settings,
}

impl EntityKind {
    /// Name of the service that owns this entity, used as the `service` log field.
    pub fn service_name(self) -> &'static str {
        match self {
            Self::Account => "AccountService",
            Self::Company => "CompanyService",
            Self::Game => "GameService",
            Self::User => "UserService",
            Self::Transaction => "TransactionService",
            Self::Settings => "SettingsService",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Account => "Account",
            Self::Company => "Company",
            Self::Game => "Game",
            Self::User => "User",
            Self::Transaction => "Transaction",
            Self::Settings => "Settings",
        };
        f.write_str(name)
    }
}

/// A 1-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, starting at 1. Page 0 is read as page 1.
    pub page: u64,
    /// Maximum number of rows per page.
    pub page_size: u64,
}

impl PageRequest {
    /// Creates a page request.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }
    }

    /// Number of rows to skip: `(page - 1) * page_size`.
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Number of rows to fetch.
    pub fn take(&self) -> u64 {
        self.page_size
    }
}

/// One page of entities plus the total row count for the same condition.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    /// Entities on this page.
    pub data: Vec<T>,
    /// Number of rows matching the condition across all pages.
    pub total: u64,
}
