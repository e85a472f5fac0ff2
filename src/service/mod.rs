//! Public repository contract.
//!
//! One service per entity. Each service builds the store condition for a filter, runs the
//! page fetch and the count concurrently with that same condition, resolves reference names
//! through a request-scoped [`cache::ReferenceCache`] and maps rows into entities. Any
//! failure is logged and returned as [`Error::RetrieveFailed`](crate::error::Error) or
//! [`Error::UpdateFailed`](crate::error::Error).

pub mod account;
pub mod cache;
pub mod company;
pub mod game;
pub mod settings;
pub mod transaction;
pub mod user;

#[cfg(test)]
mod tests;

use serde_json::Value;

/// String elements of a stored JSON array; anything else reads as empty.
pub(crate) fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
