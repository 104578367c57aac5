//! The map widget seam.

use serde_json::Value;
use terracotta_common::BoundingBox;

/// Opaque reference to a layer added to a [`MapView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerHandle(pub u64);

/// A slippy-map widget able to show tile layers and vector overlays.
pub trait MapView {
    /// Add a tile layer sourced from an XYZ URL template.
    fn add_tile_layer(&mut self, url: &str) -> LayerHandle;

    /// Add a GeoJSON overlay.
    fn add_overlay(&mut self, geojson: &Value) -> LayerHandle;

    /// Remove a layer. Unknown handles are ignored.
    fn remove_layer(&mut self, handle: LayerHandle);

    /// Currently visible extent.
    fn bounds(&self) -> BoundingBox;

    /// Animate the camera so that `bounds` is exactly framed.
    fn fly_to_bounds(&mut self, bounds: &BoundingBox);
}
