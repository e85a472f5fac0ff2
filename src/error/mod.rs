//! Error types for the back-office repositories.
//!
//! Domain-specific errors (configuration, analytical store) live in submodules and are
//! aggregated into [`Error`] through `#[from]` conversions so the `?` operator works across
//! layers. Service operations never surface a raw store error to their callers: failures are
//! logged and wrapped into [`Error::RetrieveFailed`] or [`Error::UpdateFailed`], whose
//! messages follow a fixed human-readable template.

pub mod analytics;
pub mod config;

use thiserror::Error;

use crate::{
    error::{analytics::AnalyticsError, config::ConfigError},
    model::EntityKind,
};

/// Main error type for the back-office repositories.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Analytical store error (transport, rejected query, malformed rows).
    #[error(transparent)]
    AnalyticsError(#[from] AnalyticsError),
    /// Relational store error (query failures, connection issues, missing records).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// A read operation failed; `source` holds the underlying failure.
    #[error("Failed to retrieve {kind} data for {context}")]
    RetrieveFailed {
        /// Entity being read.
        kind: EntityKind,
        /// What was being read, e.g. `id 42` or `page 3`.
        context: String,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },
    /// A write operation failed; `source` holds the underlying failure.
    #[error("Failed to update {kind} data for {context}")]
    UpdateFailed {
        /// Entity being written.
        kind: EntityKind,
        /// What was being written.
        context: String,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Logs a failed read and wraps it into [`Error::RetrieveFailed`].
    ///
    /// # Arguments
    /// - `kind` - Entity being read
    /// - `operation` - Service operation name, e.g. `get_by_filter`
    /// - `context` - Human-readable description of the request
    /// - `source` - Underlying failure
    pub(crate) fn retrieve_failed(
        kind: EntityKind,
        operation: &str,
        context: impl Into<String>,
        source: Error,
    ) -> Self {
        let context = context.into();
        tracing::error!(
            service = kind.service_name(),
            operation,
            error = %source,
            details = ?source,
            "Failed to retrieve {} data for {}",
            kind,
            context
        );

        Self::RetrieveFailed {
            kind,
            context,
            source: Box::new(source),
        }
    }

    /// Logs a failed write and wraps it into [`Error::UpdateFailed`].
    pub(crate) fn update_failed(
        kind: EntityKind,
        operation: &str,
        context: impl Into<String>,
        source: Error,
    ) -> Self {
        let context = context.into();
        tracing::error!(
            service = kind.service_name(),
            operation,
            error = %source,
            details = ?source,
            "Failed to update {} data for {}",
            kind,
            context
        );

        Self::UpdateFailed {
            kind,
            context,
            source: Box::new(source),
        }
    }
}
