//! The map view controller.
//!
//! [`Viewer`] turns user actions into requests against the tile server and
//! render calls on the map and UI seams. All state lives in one
//! [`SessionState`] owned by the controller; actions take `&mut self`, so
//! there is never more than one in flight.

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use terracotta_api::endpoints::{decode_colormap, decode_datasets, decode_keys, decode_metadata};
use terracotta_api::urls::{
    colormap_url, datasets_url, keys_url, metadata_url, rgb_url, sanitize_host, singleband_url,
};
use terracotta_api::{JsonFetcher, TilePath};
use terracotta_common::{
    compare_keys, serialize_keys, ClientError, ClientResult, DatasetKey, KeyConstraint,
    KeyDescriptor, Rgba, StretchRange,
};

use crate::config::ViewerConfig;
use crate::errors::ErrorRecord;
use crate::info::metadata_summary;
use crate::layers::ActiveLayer;
use crate::map::MapView;
use crate::network;
use crate::region::{self, region_of, Region};
use crate::session::SessionState;
use crate::ui::{LayerInfo, ViewerUi};
use crate::viewport::{coverage_ratio, should_fit};

pub struct Viewer<F, M, U> {
    config: ViewerConfig,
    fetcher: F,
    map: M,
    ui: U,
    state: SessionState,
}

impl<F, M, U> Viewer<F, M, U>
where
    F: JsonFetcher,
    M: MapView,
    U: ViewerUi,
{
    pub fn new(config: ViewerConfig, fetcher: F, map: M, ui: U) -> Self {
        let state = SessionState::new(&config);
        Self {
            config,
            fetcher,
            map,
            ui,
            state,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn into_parts(self) -> (M, U) {
        (self.map, self.ui)
    }

    // =========================================================================
    // Startup
    // =========================================================================

    /// Connect to `host`: sample colormaps, discover keys, select the first
    /// colormap and load the first dataset page. Stops at the first failure.
    #[instrument(skip(self))]
    pub async fn initialize(&mut self, host: &str) -> ClientResult<()> {
        self.state.host = sanitize_host(host);
        info!(host = %self.state.host, "Initializing viewer");

        self.load_colormaps().await?;
        self.load_keys().await?;
        self.state.current_colormap = self.config.colormaps.first().map(|c| c.id.clone());
        self.search(Vec::new()).await?;

        info!(
            keys = self.state.keys.len(),
            datasets = self.state.datasets.len(),
            "Viewer initialized"
        );
        Ok(())
    }

    /// Sample every configured colormap. All requests are issued before any
    /// is awaited; every failure is queued and the first one returned.
    pub async fn load_colormaps(&mut self) -> ClientResult<()> {
        let num_values = self.config.colormap_num_values;
        let requests: Vec<(String, String)> = self
            .config
            .colormaps
            .iter()
            .map(|c| (c.id.clone(), colormap_url(&self.state.host, &c.id, num_values)))
            .collect();

        let fetcher = &self.fetcher;
        let responses = join_all(requests.iter().map(|(_, url)| fetcher.get_json(url))).await;

        let mut first_error = None;
        for ((id, url), response) in requests.into_iter().zip(responses) {
            let value = match response {
                Ok(value) => value,
                Err(err) => {
                    network::record_failure(&mut self.state.errors, &mut self.ui, &url, &err);
                    first_error.get_or_insert(err);
                    continue;
                }
            };
            match network::log_decode(decode_colormap(&url, value, num_values as usize)) {
                Ok(Some(values)) => {
                    self.state.colormap_values.insert(id, values);
                }
                Ok(None) => debug!(colormap = %id, "Response carried no colormap values"),
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Fetch the key dimensions of the catalog.
    pub async fn load_keys(&mut self) -> ClientResult<&[KeyDescriptor]> {
        let url = keys_url(&self.state.host);
        let value = self.get(&url).await?;
        self.state.keys = network::log_decode(decode_keys(&url, value))?;
        debug!(count = self.state.keys.len(), "Loaded key dimensions");
        Ok(&self.state.keys)
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// Start a new search: back to page 0 with the given constraints.
    pub async fn search(&mut self, constraints: Vec<KeyConstraint>) -> ClientResult<()> {
        self.state.constraints = constraints;
        self.state.pager.reset();
        self.ui.update_page_controls(self.state.pager.controls());
        self.query_datasets().await
    }

    /// Move `step` pages and re-run the current search.
    pub async fn increment_page(&mut self, step: i64) -> ClientResult<()> {
        self.state.pager.increment(step);
        self.ui.update_page_controls(self.state.pager.controls());
        self.query_datasets().await
    }

    async fn query_datasets(&mut self) -> ClientResult<()> {
        let url = datasets_url(
            &self.state.host,
            &self.state.constraints,
            self.state.pager.per_page(),
            self.state.pager.page(),
        );
        let value = self.get(&url).await?;
        let listing = network::log_decode(decode_datasets(&url, value))?;

        self.state.pager.record_page_len(listing.len());
        self.state.datasets = listing.dataset_keys(&self.state.keys);
        debug!(
            page = self.state.pager.page(),
            count = self.state.datasets.len(),
            "Loaded dataset page"
        );

        self.ui.show_datasets(&self.state.datasets);
        self.ui.update_page_controls(self.state.pager.controls());
        Ok(())
    }

    /// Thumbnail URL for a listed dataset with the current options.
    pub fn preview_url(&self, key: &DatasetKey) -> String {
        let options = self.state.layer_options();
        singleband_url(
            &self.state.host,
            key.components(),
            Some(&options),
            TilePath::Preview(self.config.thumbnail_size),
        )
    }

    // =========================================================================
    // Metadata
    // =========================================================================

    /// Fetch and cache metadata for `key` unless it is already cached.
    pub async fn ensure_metadata(&mut self, key: &DatasetKey) -> ClientResult<()> {
        if self.state.metadata.contains(key) {
            return Ok(());
        }
        let url = metadata_url(&self.state.host, key);
        let value = self.get(&url).await?;
        let metadata = network::log_decode(decode_metadata(&url, value))?;
        self.state.metadata.store(metadata);
        Ok(())
    }

    /// Fetch metadata for all `keys` concurrently. Failures are queued
    /// without affecting the others. Returns how many were stored.
    pub async fn prefetch_metadata(&mut self, keys: &[DatasetKey]) -> usize {
        let urls: Vec<String> = keys
            .iter()
            .map(|key| metadata_url(&self.state.host, key))
            .collect();

        let fetcher = &self.fetcher;
        let responses = join_all(urls.iter().map(|url| fetcher.get_json(url))).await;

        let mut stored = 0;
        for (url, response) in urls.iter().zip(responses) {
            match response {
                Ok(value) => {
                    if let Ok(metadata) = network::log_decode(decode_metadata(url, value)) {
                        self.state.metadata.store(metadata);
                        stored += 1;
                    }
                }
                Err(err) => {
                    network::record_failure(&mut self.state.errors, &mut self.ui, url, &err)
                }
            }
        }
        stored
    }

    // =========================================================================
    // Layer selection
    // =========================================================================

    /// Show `key` as the single-band layer. Re-selecting the active key does
    /// nothing. With `reset_view`, the camera moves when the dataset covers
    /// too little of the viewport and its bounds are cached.
    #[instrument(skip(self, key), fields(key = %key))]
    pub fn select_singleband(&mut self, key: DatasetKey, reset_view: bool) {
        if compare_keys(self.state.active.singleband_key(), Some(&key)) {
            debug!("Dataset already active");
            return;
        }
        self.state.selected_region = None;
        self.activate_singleband(key, reset_view);
    }

    /// Show an RGB composite. Replaces any single-band layer.
    #[instrument(skip(self))]
    pub fn select_rgb(&mut self, shared_keys: Vec<String>, rgb_keys: [String; 3]) {
        if self.state.active.is_rgb(&shared_keys, &rgb_keys) {
            debug!("Composite already active");
            return;
        }
        self.state.selected_region = None;
        self.activate_rgb(shared_keys, rgb_keys);
    }

    /// Remove the active layer, the selection marker and the info panel.
    pub fn clear(&mut self) {
        self.remove_active_layer();
        self.state.selected_region = None;
        self.ui.mark_selected(None);
        self.ui.hide_layer_info();
        self.ui.set_export_link(None);
    }

    /// Change the colormap, redrawing the active layer in place.
    pub fn set_colormap(&mut self, id: &str) -> ClientResult<()> {
        if !self.config.colormaps.iter().any(|c| c.id == id) {
            return Err(self.alert(ClientError::Selection(format!("Unknown colormap '{}'", id))));
        }
        self.state.current_colormap = Some(id.to_string());
        self.refresh_active();
        Ok(())
    }

    /// Change the stretch range, redrawing the active layer in place.
    pub fn set_stretch(&mut self, stretch: StretchRange) {
        self.state.current_stretch = stretch;
        self.refresh_active();
    }

    /// Sampled values of a colormap, if it was loaded.
    pub fn colormap_values(&self, id: &str) -> Option<&[Rgba]> {
        self.state.colormap_values.get(id).map(Vec::as_slice)
    }

    fn refresh_active(&mut self) {
        match self.state.active.clone() {
            ActiveLayer::SingleBand { key, .. } => self.activate_singleband(key, false),
            ActiveLayer::Rgb { shared, bands, .. } => self.activate_rgb(shared, bands),
            ActiveLayer::Empty => {}
        }
    }

    fn activate_singleband(&mut self, key: DatasetKey, reset_view: bool) {
        self.remove_active_layer();

        let options = self.state.layer_options();
        let url = singleband_url(&self.state.host, key.components(), Some(&options), TilePath::Xyz);
        let handle = self.map.add_tile_layer(&url);

        let marker = self
            .state
            .selected_region
            .clone()
            .unwrap_or_else(|| key.serialize());
        self.ui.mark_selected(Some(&marker));

        let summary = self.state.metadata.lookup(&key).map(metadata_summary);
        self.ui.show_layer_info(&LayerInfo {
            url: url.clone(),
            summary,
        });

        let export = export_path(&self.config.export_base, &key);
        self.ui.set_export_link(Some(&export));

        if reset_view {
            self.fit_viewport(&key);
        }

        info!(key = %key, url = %url, "Single-band layer active");
        self.state.active = ActiveLayer::SingleBand { key, handle, url };
    }

    fn activate_rgb(&mut self, shared: Vec<String>, bands: [String; 3]) {
        self.remove_active_layer();

        let options = self.state.layer_options();
        let url = rgb_url(&self.state.host, &shared, &bands, Some(&options), TilePath::Xyz);
        let handle = self.map.add_tile_layer(&url);

        let marker = serialize_keys(&shared);
        self.ui
            .mark_selected((!marker.is_empty()).then_some(marker.as_str()));
        self.ui.show_layer_info(&LayerInfo {
            url: url.clone(),
            summary: None,
        });
        self.ui.set_export_link(None);

        info!(url = %url, "RGB layer active");
        self.state.active = ActiveLayer::Rgb {
            shared,
            bands,
            handle,
            url,
        };
    }

    fn remove_active_layer(&mut self) {
        if let Some(handle) = self.state.active.take().handle() {
            self.map.remove_layer(handle);
        }
    }

    fn fit_viewport(&mut self, key: &DatasetKey) {
        let Some(bounds) = self.state.metadata.lookup(key).map(|m| m.bounds) else {
            debug!(key = %key, "No cached bounds, viewport unchanged");
            return;
        };

        let screen = self.map.bounds();
        if should_fit(&bounds, &screen, self.config.fit_threshold) {
            debug!(coverage = coverage_ratio(&bounds, &screen), "Flying to dataset bounds");
            self.map.fly_to_bounds(&bounds);
        } else {
            debug!(coverage = coverage_ratio(&bounds, &screen), "Dataset already visible");
        }
    }

    // =========================================================================
    // Hover
    // =========================================================================

    /// Outline the footprint of `key` if its metadata is cached.
    pub fn hover(&mut self, key: &DatasetKey) {
        self.hover_end();
        let hull = self
            .state
            .metadata
            .lookup(key)
            .filter(|m| m.has_footprint())
            .map(|m| m.convex_hull.clone());
        if let Some(hull) = hull {
            self.state.overlay = Some(self.map.add_overlay(&hull));
        }
    }

    pub fn hover_end(&mut self) {
        if let Some(handle) = self.state.overlay.take() {
            self.map.remove_layer(handle);
        }
    }

    // =========================================================================
    // Regions
    // =========================================================================

    /// Show the region tree and prefetch metadata for every region and band.
    pub async fn load_regions(&mut self, regions: &[Region], bands: Vec<String>) -> usize {
        self.state.regions = region::flatten(regions);
        self.state.bands = bands;
        self.ui.show_regions(&self.state.regions);

        let keys: Vec<DatasetKey> = self
            .state
            .regions
            .iter()
            .flat_map(|entry| self.state.bands.iter().map(move |band| entry.dataset_key(band)))
            .collect();
        info!(
            regions = self.state.regions.len(),
            datasets = keys.len(),
            "Prefetching region metadata"
        );
        self.prefetch_metadata(&keys).await
    }

    /// Show the region list entry `entry_id` in the active band, or the
    /// first band when none was chosen.
    pub fn select_region(&mut self, entry_id: &str) -> ClientResult<()> {
        let band = self
            .state
            .active_band
            .clone()
            .or_else(|| self.state.bands.first().cloned());
        let Some(band) = band else {
            return Err(self.alert(ClientError::Selection("No band available".to_string())));
        };

        self.state.selected_region = Some(entry_id.to_string());
        let key = DatasetKey::new([region_of(entry_id), band.as_str()]);
        if compare_keys(self.state.active.singleband_key(), Some(&key)) {
            self.ui.mark_selected(Some(entry_id));
        } else {
            self.activate_singleband(key, true);
        }
        Ok(())
    }

    /// Switch the band of the selected region (or the first listed one).
    pub async fn select_band(&mut self, band: &str) -> ClientResult<()> {
        let region_id = self
            .state
            .selected_region
            .clone()
            .or_else(|| self.state.regions.first().map(|e| e.id.clone()));
        let Some(region_id) = region_id else {
            return Err(self.alert(ClientError::Selection("Select a region first".to_string())));
        };

        self.state.active_band = Some(band.to_string());
        let region = region_of(&region_id).to_string();

        let constraints = [
            KeyConstraint::new("band", band),
            KeyConstraint::new("region", region.as_str()),
        ];
        let url = datasets_url(&self.state.host, &constraints, self.state.pager.per_page(), 0);
        let value = self.get(&url).await?;
        let listing = network::log_decode(decode_datasets(&url, value))?;
        if listing.is_empty() {
            return Err(self.alert(ClientError::Selection(format!(
                "No dataset for region {} and band {}",
                region, band
            ))));
        }

        self.state.selected_region = Some(region_id.clone());
        let key = DatasetKey::new([region.as_str(), band]);
        if compare_keys(self.state.active.singleband_key(), Some(&key)) {
            self.ui.mark_selected(Some(&region_id));
        } else {
            self.activate_singleband(key, true);
        }
        Ok(())
    }

    /// Download link of the active single-band dataset.
    pub fn export_link(&mut self) -> ClientResult<String> {
        let link = self
            .state
            .active
            .singleband_key()
            .map(|key| export_path(&self.config.export_base, key));
        match link {
            Some(link) => Ok(link),
            None => Err(self.alert(ClientError::Selection("Select a region first".to_string()))),
        }
    }

    // =========================================================================
    // Errors
    // =========================================================================

    /// Dismiss the error shown at `index`; other indices are unaffected.
    pub fn dismiss_error(&mut self, index: usize) -> Option<ErrorRecord> {
        let dismissed = self.state.errors.dismiss(index);
        if dismissed.is_some() {
            self.ui.render_errors(&self.state.errors);
        }
        dismissed
    }

    async fn get(&mut self, url: &str) -> ClientResult<Value> {
        network::http_get(&self.fetcher, &mut self.state.errors, &mut self.ui, url).await
    }

    fn alert(&mut self, err: ClientError) -> ClientError {
        warn!(error = %err, "Invalid selection");
        self.ui.alert(&err.to_string());
        err
    }
}

/// `<export_base>/<k1>_<k2>.tif`
fn export_path(base: &str, key: &DatasetKey) -> String {
    format!("{}/{}.tif", base, key.components().join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_path_joins_components() {
        let key = DatasetKey::new(["RossIceShelf", "blue"]);
        assert_eq!(
            export_path("/static/mosaics/optimized", &key),
            "/static/mosaics/optimized/RossIceShelf_blue.tif"
        );
    }
}
