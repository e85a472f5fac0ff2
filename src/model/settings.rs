//! Back-office settings singleton.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Name of the banned IP list inside [`SettingsData`].
pub static HARD_BANNED_IPS: &str = "hard_banned_ips";

/// Named string-list fields stored in the settings row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsData(BTreeMap<String, Vec<String>>);

impl SettingsData {
    /// Values of a named field, empty when the field is absent.
    pub fn get(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Replaces the values of a named field.
    pub fn set(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.0.insert(name.into(), values);
    }

    /// IPs blocked from the dashboard.
    pub fn hard_banned_ips(&self) -> &[String] {
        self.get(HARD_BANNED_IPS)
    }

    /// Decodes the stored JSON document.
    ///
    /// # Returns
    /// - `Ok(SettingsData)` - The document is an object of string lists
    /// - `Err(Error::ParseError)` - Any other shape
    pub fn from_json(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value)
            .map_err(|e| Error::ParseError(format!("Invalid settings document: {}", e)))
    }

    /// Encodes the fields as the stored JSON document.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(name, values)| {
                    let values = values.iter().cloned().map(Value::String).collect();
                    (name.clone(), Value::Array(values))
                })
                .collect(),
        )
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for SettingsData {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Settings row with decoded data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsEntity {
    pub id: String,
    pub data: SettingsData,
    pub created_at: String,
    pub modified_at: Option<String>,
}
