//! Per-dataset metadata as served by `/metadata/<keys>`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bbox::BoundingBox;
use crate::dataset::value_to_component;
use crate::keys::DatasetKey;

/// Summary statistics and footprint of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Key name to key value, in key-dimension order
    pub keys: Map<String, Value>,

    /// Dataset extent as `[west, south, east, north]`
    pub bounds: BoundingBox,

    /// GeoJSON polygon outlining the valid data
    #[serde(default)]
    pub convex_hull: Value,

    #[serde(default)]
    pub nodata: Option<f64>,

    /// Minimum and maximum valid value
    pub range: [f64; 2],

    #[serde(default)]
    pub mean: f64,

    #[serde(default)]
    pub stdev: f64,

    #[serde(default)]
    pub percentiles: Vec<f64>,

    #[serde(default)]
    pub valid_percentage: f64,

    /// Free-form metadata attached at ingestion
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Metadata {
    /// The dataset key built from this record's own key values.
    pub fn dataset_key(&self) -> DatasetKey {
        self.keys.values().map(value_to_component).collect()
    }

    /// Serialized cache key, e.g. `Ross/blue`.
    pub fn cache_key(&self) -> String {
        self.dataset_key().serialize()
    }

    pub fn has_footprint(&self) -> bool {
        !self.convex_hull.is_null()
    }
}
