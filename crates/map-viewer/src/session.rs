//! Session state owned by the controller.

use std::collections::HashMap;

use terracotta_api::LayerOptions;
use terracotta_common::{DatasetKey, KeyConstraint, KeyDescriptor, Rgba, StretchRange};

use crate::cache::MetadataCache;
use crate::config::ViewerConfig;
use crate::errors::ErrorQueue;
use crate::layers::ActiveLayer;
use crate::map::LayerHandle;
use crate::pagination::Pager;
use crate::region::RegionEntry;

/// Everything the viewer remembers between user actions.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Sanitized remote host
    pub host: String,

    /// Key dimensions reported by `/keys`
    pub keys: Vec<KeyDescriptor>,

    pub pager: Pager,

    /// Constraints of the most recent search
    pub constraints: Vec<KeyConstraint>,

    /// Dataset keys of the most recently loaded page
    pub datasets: Vec<DatasetKey>,

    pub metadata: MetadataCache,

    /// Sampled RGBA values per colormap id
    pub colormap_values: HashMap<String, Vec<Rgba>>,

    pub current_colormap: Option<String>,

    pub current_stretch: StretchRange,

    pub active: ActiveLayer,

    /// Footprint overlay of the hovered dataset
    pub overlay: Option<LayerHandle>,

    pub regions: Vec<RegionEntry>,

    /// Region list entry currently marked selected
    pub selected_region: Option<String>,

    pub active_band: Option<String>,

    /// Band names offered for region selection
    pub bands: Vec<String>,

    pub errors: ErrorQueue,
}

impl SessionState {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            host: config.host(),
            keys: Vec::new(),
            pager: Pager::new(config.datasets_per_page),
            constraints: Vec::new(),
            datasets: Vec::new(),
            metadata: MetadataCache::new(),
            colormap_values: HashMap::new(),
            current_colormap: None,
            current_stretch: config.default_stretch,
            active: ActiveLayer::Empty,
            overlay: None,
            regions: Vec::new(),
            selected_region: None,
            active_band: None,
            bands: Vec::new(),
            errors: ErrorQueue::new(),
        }
    }

    /// Tile options from the current colormap and stretch range.
    pub fn layer_options(&self) -> LayerOptions {
        let mut options = LayerOptions::new();
        if let Some(colormap) = &self.current_colormap {
            options.insert("colormap", colormap.as_str());
        }
        options.insert("stretch_range", self.current_stretch.to_query_value());
        options
    }
}
