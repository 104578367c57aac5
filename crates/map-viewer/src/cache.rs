//! Session-lifetime metadata cache.
//!
//! Entries are keyed by serialized dataset key and never evicted or
//! refreshed. A stale response arriving late simply overwrites the entry for
//! the same key with equivalent content.

use std::collections::HashMap;
use tracing::debug;

use terracotta_common::{DatasetKey, Metadata};

#[derive(Debug, Clone, Default)]
pub struct MetadataCache {
    entries: HashMap<String, Metadata>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for the metadata's own key.
    pub fn store(&mut self, metadata: Metadata) -> String {
        let key = metadata.cache_key();
        debug!(key = %key, "Caching metadata");
        self.entries.insert(key.clone(), metadata);
        key
    }

    /// Cached metadata for `key`, or `None` if it has not been fetched yet.
    pub fn lookup(&self, key: &DatasetKey) -> Option<&Metadata> {
        self.lookup_serialized(&key.serialize())
    }

    pub fn lookup_serialized(&self, key: &str) -> Option<&Metadata> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &DatasetKey) -> bool {
        self.lookup(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(region: &str, band: &str, mean: f64) -> Metadata {
        serde_json::from_value(json!({
            "keys": {"region": region, "band": band},
            "bounds": [0.0, 0.0, 1.0, 1.0],
            "range": [0.0, 1.0],
            "mean": mean
        }))
        .unwrap()
    }

    #[test]
    fn test_store_and_lookup() {
        let mut cache = MetadataCache::new();
        assert_eq!(cache.store(metadata("Ross", "blue", 1.0)), "Ross/blue");

        let key = DatasetKey::new(["Ross", "blue"]);
        assert_eq!(cache.lookup(&key).unwrap().mean, 1.0);
        assert!(cache.lookup(&DatasetKey::new(["Ross", "red"])).is_none());
    }

    #[test]
    fn test_store_overwrites() {
        let mut cache = MetadataCache::new();
        cache.store(metadata("Ross", "blue", 1.0));
        cache.store(metadata("Ross", "blue", 2.0));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lookup_serialized("Ross/blue").unwrap().mean, 2.0);
    }
}
