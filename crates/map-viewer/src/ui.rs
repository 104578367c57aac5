//! The UI seam: list views, panels and controls driven by the controller.
//!
//! Every method is a render call. The controller invokes them after each
//! state mutation, so implementations can be stateless projections.

use terracotta_common::DatasetKey;

use crate::errors::ErrorQueue;
use crate::region::RegionEntry;

/// State of the pagination controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControls {
    /// One-based page number shown to the user
    pub counter: u32,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// Contents of the layer info panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerInfo {
    /// XYZ template URL of the active layer
    pub url: String,
    /// Metadata summary line, absent until metadata is cached
    pub summary: Option<String>,
}

pub trait ViewerUi {
    /// Re-render the error list.
    fn render_errors(&mut self, errors: &ErrorQueue);

    /// Replace the dataset listing.
    fn show_datasets(&mut self, datasets: &[DatasetKey]);

    /// Replace the region list.
    fn show_regions(&mut self, regions: &[RegionEntry]);

    fn update_page_controls(&mut self, controls: PageControls);

    /// Move the "selected" marker to `id`, or clear it.
    fn mark_selected(&mut self, id: Option<&str>);

    fn show_layer_info(&mut self, info: &LayerInfo);

    fn hide_layer_info(&mut self);

    fn set_export_link(&mut self, href: Option<&str>);

    /// Synchronous user-facing message for invalid selections.
    fn alert(&mut self, message: &str);
}
