//! In-memory [`MapView`] and [`ViewerUi`] implementations.
//!
//! Used by the command-line driver and by tests. Both record what they were
//! asked to do instead of drawing anything.

use serde_json::Value;
use std::collections::BTreeMap;

use terracotta_common::{BoundingBox, DatasetKey};

use crate::errors::{ErrorQueue, ErrorRecord};
use crate::map::{LayerHandle, MapView};
use crate::region::RegionEntry;
use crate::ui::{LayerInfo, PageControls, ViewerUi};

/// What was done to a [`HeadlessMap`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    TileAdded(LayerHandle, String),
    OverlayAdded(LayerHandle),
    Removed(LayerHandle),
    FlewTo(BoundingBox),
}

/// A map with a fixed viewport that only moves when asked to fly.
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    viewport: BoundingBox,
    next_handle: u64,
    tiles: BTreeMap<LayerHandle, String>,
    overlays: BTreeMap<LayerHandle, Value>,
    events: Vec<MapEvent>,
}

impl HeadlessMap {
    pub fn new(viewport: BoundingBox) -> Self {
        Self {
            viewport,
            next_handle: 1,
            tiles: BTreeMap::new(),
            overlays: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    /// URLs of the tile layers currently on the map.
    pub fn tile_urls(&self) -> Vec<&str> {
        self.tiles.values().map(String::as_str).collect()
    }

    pub fn overlays(&self) -> Vec<&Value> {
        self.overlays.values().collect()
    }

    pub fn events(&self) -> &[MapEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Number of camera moves so far.
    pub fn fly_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, MapEvent::FlewTo(_)))
            .count()
    }

    fn allocate(&mut self) -> LayerHandle {
        let handle = LayerHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new(BoundingBox::new(-180.0, -90.0, 180.0, 90.0))
    }
}

impl MapView for HeadlessMap {
    fn add_tile_layer(&mut self, url: &str) -> LayerHandle {
        let handle = self.allocate();
        self.tiles.insert(handle, url.to_string());
        self.events.push(MapEvent::TileAdded(handle, url.to_string()));
        handle
    }

    fn add_overlay(&mut self, geojson: &Value) -> LayerHandle {
        let handle = self.allocate();
        self.overlays.insert(handle, geojson.clone());
        self.events.push(MapEvent::OverlayAdded(handle));
        handle
    }

    fn remove_layer(&mut self, handle: LayerHandle) {
        let removed = self.tiles.remove(&handle).is_some() || self.overlays.remove(&handle).is_some();
        if removed {
            self.events.push(MapEvent::Removed(handle));
        }
    }

    fn bounds(&self) -> BoundingBox {
        self.viewport
    }

    fn fly_to_bounds(&mut self, bounds: &BoundingBox) {
        self.viewport = *bounds;
        self.events.push(MapEvent::FlewTo(*bounds));
    }
}

/// A UI that keeps the last value of every render call.
#[derive(Debug, Clone, Default)]
pub struct RecordingUi {
    pub errors: Vec<(usize, ErrorRecord)>,
    pub error_renders: usize,
    pub datasets: Vec<DatasetKey>,
    pub regions: Vec<RegionEntry>,
    pub page_controls: Option<PageControls>,
    pub selected: Option<String>,
    pub layer_info: Option<LayerInfo>,
    pub export_link: Option<String>,
    pub alerts: Vec<String>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewerUi for RecordingUi {
    fn render_errors(&mut self, errors: &ErrorQueue) {
        self.errors = errors.iter().map(|(i, r)| (i, r.clone())).collect();
        self.error_renders += 1;
    }

    fn show_datasets(&mut self, datasets: &[DatasetKey]) {
        self.datasets = datasets.to_vec();
    }

    fn show_regions(&mut self, regions: &[RegionEntry]) {
        self.regions = regions.to_vec();
    }

    fn update_page_controls(&mut self, controls: PageControls) {
        self.page_controls = Some(controls);
    }

    fn mark_selected(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
    }

    fn show_layer_info(&mut self, info: &LayerInfo) {
        self.layer_info = Some(info.clone());
    }

    fn hide_layer_info(&mut self) {
        self.layer_info = None;
    }

    fn set_export_link(&mut self, href: Option<&str>) {
        self.export_link = href.map(str::to_string);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
