//! Dataset keys.
//!
//! A dataset is addressed by an ordered tuple of key values (for example
//! `[region, band]`). Joined with `/` the tuple is both the URL path segment
//! sent to the tile server and the lookup key of the metadata cache.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered key components identifying one raster dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetKey(Vec<String>);

impl DatasetKey {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(components.into_iter().map(Into::into).collect())
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Joined form used for URLs and cache lookups.
    pub fn serialize(&self) -> String {
        serialize_keys(&self.0)
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl From<Vec<String>> for DatasetKey {
    fn from(components: Vec<String>) -> Self {
        Self(components)
    }
}

impl<S: Into<String>> FromIterator<S> for DatasetKey {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Join key components with `/`. An empty slice yields an empty string.
pub fn serialize_keys<S: AsRef<str>>(keys: &[S]) -> String {
    keys.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
}

/// Element-wise equality where a missing side never matches.
pub fn compare_keys(a: Option<&DatasetKey>, b: Option<&DatasetKey>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
