//! Colormap descriptors and sampled colormap values.

use serde::{Deserialize, Serialize};

/// A colormap offered in the viewer's selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColormapDescriptor {
    /// Label shown to the user
    pub display_name: String,

    /// Identifier understood by the tile server
    pub id: String,
}

impl ColormapDescriptor {
    pub fn new(display_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            id: id.into(),
        }
    }
}

/// The built-in colormap list. The first entry is the initial selection.
pub fn default_colormaps() -> Vec<ColormapDescriptor> {
    [
        ("Greyscale", "greys_r"),
        ("Viridis", "viridis"),
        ("Blue-Red", "rdbu_r"),
        ("Blue-Green", "bugn"),
        ("Yellow-Green", "ylgn"),
        ("Magma", "magma"),
        ("Earth", "gist_earth"),
        ("Ocean", "ocean"),
    ]
    .into_iter()
    .map(|(name, id)| ColormapDescriptor::new(name, id))
    .collect()
}

/// An RGBA color as returned by the `/colormap` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// One sample of a colormap response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColormapEntry {
    pub value: f64,
    pub rgba: Rgba,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colormaps_start_with_greyscale() {
        let maps = default_colormaps();
        assert_eq!(maps.len(), 8);
        assert_eq!(maps[0].id, "greys_r");
        assert_eq!(maps[0].display_name, "Greyscale");
    }

    #[test]
    fn test_entry_decodes_rgba_array() {
        let entry: ColormapEntry =
            serde_json::from_str(r#"{"value": 0.5, "rgba": [255, 128, 0, 255]}"#).unwrap();
        assert_eq!(entry.rgba, Rgba::new(255, 128, 0, 255));
        assert_eq!(entry.value, 0.5);
    }
}
