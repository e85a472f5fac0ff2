use thiserror::Error;

/// Errors returned by the analytical store client.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Transport-level failure (connection, timeout, body decoding).
    #[error(transparent)]
    RequestError(#[from] reqwest::Error),
    /// The store rejected the query.
    #[error("Analytics query failed with status {status}: {message}")]
    QueryRejected {
        /// HTTP status returned by the store.
        status: u16,
        /// Error message reported by the store.
        message: String,
    },
    /// The query did not finish within the synchronous request window.
    #[error("Analytics query job {0} did not complete in time")]
    JobIncomplete(String),
    /// The response body didn't have the expected shape.
    #[error("Malformed analytics response: {0}")]
    MalformedResponse(String),
    /// A row is missing a column or holds a value of the wrong type.
    #[error("Invalid value for analytics column {column}: {reason}")]
    InvalidColumn {
        /// Column name.
        column: String,
        /// Why the value was rejected.
        reason: String,
    },
}
