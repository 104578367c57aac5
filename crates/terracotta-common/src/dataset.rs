//! Key dimensions and dataset listings returned by the tile server.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::keys::DatasetKey;

/// One key dimension from `/keys`, e.g. `region` or `band`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    pub key: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A `<key>=<value>` filter applied to the dataset listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConstraint {
    pub key: String,
    pub value: String,
}

impl KeyConstraint {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A page of the `/datasets` listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetListing {
    #[serde(default)]
    pub datasets: Vec<Map<String, Value>>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub page: Option<u32>,
}

impl DatasetListing {
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Dataset keys ordered by the given key dimensions. With no dimensions
    /// the listing's own field order is used.
    pub fn dataset_keys(&self, dimensions: &[KeyDescriptor]) -> Vec<DatasetKey> {
        self.datasets
            .iter()
            .map(|entry| {
                if dimensions.is_empty() {
                    entry.values().map(value_to_component).collect()
                } else {
                    dimensions
                        .iter()
                        .map(|d| entry.get(&d.key).map(value_to_component).unwrap_or_default())
                        .collect()
                }
            })
            .collect()
    }
}

/// Render a JSON key value as a path component without JSON quoting.
pub fn value_to_component(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
