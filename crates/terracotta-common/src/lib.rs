//! Common types shared across the Terracotta viewer crates.

pub mod bbox;
pub mod colormap;
pub mod dataset;
pub mod error;
pub mod keys;
pub mod metadata;
pub mod stretch;

pub use bbox::BoundingBox;
pub use colormap::{default_colormaps, ColormapDescriptor, ColormapEntry, Rgba};
pub use dataset::{DatasetListing, KeyConstraint, KeyDescriptor};
pub use error::{ClientError, ClientResult};
pub use keys::{compare_keys, serialize_keys, DatasetKey};
pub use metadata::Metadata;
pub use stretch::StretchRange;
