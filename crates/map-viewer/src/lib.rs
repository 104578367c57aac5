//! View controller for a Terracotta raster tile viewer.
//!
//! The [`Viewer`] owns the session state and drives two seams: a [`MapView`]
//! (the tile-layer widget) and a [`ViewerUi`] (lists, panels and controls).
//! Network access goes through a [`terracotta_api::JsonFetcher`]; every failed
//! request is appended to the session error queue and re-rendered.
//!
//! Headless implementations of both seams live in [`headless`].

pub mod cache;
pub mod config;
pub mod controller;
pub mod errors;
pub mod headless;
pub mod info;
pub mod layers;
pub mod map;
mod network;
pub mod pagination;
pub mod region;
pub mod session;
pub mod ui;
pub mod viewport;

pub use cache::MetadataCache;
pub use config::ViewerConfig;
pub use controller::Viewer;
pub use errors::{ErrorQueue, ErrorRecord};
pub use headless::{HeadlessMap, MapEvent, RecordingUi};
pub use layers::ActiveLayer;
pub use map::{LayerHandle, MapView};
pub use pagination::Pager;
pub use region::{Region, RegionEntry};
pub use session::SessionState;
pub use ui::{LayerInfo, PageControls, ViewerUi};
