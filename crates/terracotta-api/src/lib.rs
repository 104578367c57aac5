//! Client side of the Terracotta tile server HTTP API.
//!
//! - [`urls`] builds request URLs without performing I/O
//! - [`fetch`] performs single-attempt GET requests returning JSON
//! - [`endpoints`] decodes endpoint responses into typed records

pub mod endpoints;
pub mod fetch;
pub mod metrics;
pub mod urls;

pub use fetch::{HttpFetcher, JsonFetcher};
pub use urls::{LayerOptions, TilePath, THUMBNAIL_SIZE};
