//! Region hierarchy shown in the search results list.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use terracotta_common::DatasetKey;

/// A named region, possibly with nested subregions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,

    /// Numeric or string identifier, kept as text
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,

    #[serde(default)]
    pub subregions: Vec<Region>,
}

/// One flattened list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionEntry {
    /// `<name without spaces>/<id>`
    pub id: String,

    /// Display name
    pub name: String,

    /// Nesting depth, 0 for top-level regions
    pub depth: usize,
}

impl Region {
    /// Name with spaces removed, as used in dataset keys.
    pub fn key_name(&self) -> String {
        self.name.split(' ').collect()
    }

    pub fn entry_id(&self) -> String {
        format!("{}/{}", self.key_name(), self.id)
    }
}

impl RegionEntry {
    /// Region component of the entry id.
    pub fn region_key(&self) -> &str {
        region_of(&self.id)
    }

    /// Dataset key of this region for `band`.
    pub fn dataset_key(&self, band: &str) -> DatasetKey {
        DatasetKey::new([self.region_key(), band])
    }
}

/// Region component of a list entry id (the part before the first `/`).
pub fn region_of(entry_id: &str) -> &str {
    entry_id.split('/').next().unwrap_or(entry_id)
}

/// Flatten a region tree depth-first, parents before their subregions.
pub fn flatten(regions: &[Region]) -> Vec<RegionEntry> {
    let mut entries = Vec::new();
    flatten_into(regions, 0, &mut entries);
    entries
}

fn flatten_into(regions: &[Region], depth: usize, out: &mut Vec<RegionEntry>) {
    for region in regions {
        out.push(RegionEntry {
            id: region.entry_id(),
            name: region.name.clone(),
            depth,
        });
        flatten_into(&region.subregions, depth + 1, out);
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "region id must be a string or number, got {}",
            other
        ))),
    }
}
