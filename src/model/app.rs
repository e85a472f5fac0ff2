use sea_orm::DatabaseConnection;

use crate::{analytics::BigQueryClient, crypto::FieldCipher, util::link::DashboardLinks};

/// Shared handles the services read from.
#[derive(Clone)]
pub struct AppState {
    /// Relational store.
    pub db: DatabaseConnection,
    /// Analytical store.
    pub analytics: BigQueryClient,
    /// PII codecs keyed from the configured secret.
    pub cipher: FieldCipher,
    /// Dashboard deep-link builder.
    pub links: DashboardLinks,
}
