//! The active raster layer slot.
//!
//! Single-band and RGB layers share one slot, so at most one of them is
//! displayed at any time.

use terracotta_common::DatasetKey;

use crate::map::LayerHandle;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveLayer {
    #[default]
    Empty,
    SingleBand {
        key: DatasetKey,
        handle: LayerHandle,
        url: String,
    },
    Rgb {
        shared: Vec<String>,
        bands: [String; 3],
        handle: LayerHandle,
        url: String,
    },
}

impl ActiveLayer {
    pub fn is_empty(&self) -> bool {
        matches!(self, ActiveLayer::Empty)
    }

    pub fn handle(&self) -> Option<LayerHandle> {
        match self {
            ActiveLayer::Empty => None,
            ActiveLayer::SingleBand { handle, .. } | ActiveLayer::Rgb { handle, .. } => {
                Some(*handle)
            }
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ActiveLayer::Empty => None,
            ActiveLayer::SingleBand { url, .. } | ActiveLayer::Rgb { url, .. } => Some(url),
        }
    }

    /// Key of the single-band layer, if that is what is displayed.
    pub fn singleband_key(&self) -> Option<&DatasetKey> {
        match self {
            ActiveLayer::SingleBand { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Whether an RGB layer for exactly these keys is displayed.
    pub fn is_rgb(&self, shared_keys: &[String], rgb_keys: &[String; 3]) -> bool {
        matches!(self, ActiveLayer::Rgb { shared, bands, .. }
            if shared.as_slice() == shared_keys && bands == rgb_keys)
    }

    /// Take the current layer out of the slot, leaving it empty.
    pub fn take(&mut self) -> ActiveLayer {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_empties_slot() {
        let mut slot = ActiveLayer::SingleBand {
            key: DatasetKey::new(["R", "B"]),
            handle: LayerHandle(3),
            url: "u".to_string(),
        };
        assert_eq!(slot.handle(), Some(LayerHandle(3)));

        let previous = slot.take();
        assert!(slot.is_empty());
        assert_eq!(previous.singleband_key(), Some(&DatasetKey::new(["R", "B"])));
    }

    #[test]
    fn test_rgb_identity() {
        let bands = ["r".to_string(), "g".to_string(), "b".to_string()];
        let slot = ActiveLayer::Rgb {
            shared: vec!["Ross".to_string()],
            bands: bands.clone(),
            handle: LayerHandle(1),
            url: "u".to_string(),
        };
        assert!(slot.is_rgb(&["Ross".to_string()], &bands));
        assert!(!slot.is_rgb(&[], &bands));
        assert!(slot.singleband_key().is_none());
    }
}
