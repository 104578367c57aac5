//! Common test fixtures for Terracotta viewer tests.
//!
//! Bodies mirror what a Terracotta server returns for a small catalog of
//! Antarctic mosaics keyed by `[region, band]`.

use serde_json::{json, Value};

/// Host used by in-memory tests.
pub const HOST: &str = "http://tc.test";

/// Common bounding box definitions for testing, as `[west, south, east, north]`.
pub mod bbox {
    /// Whole world
    pub const GLOBAL: [f64; 4] = [-180.0, -90.0, 180.0, 90.0];

    /// Ross Ice Shelf region (degenerate across the antimeridian is avoided)
    pub const ROSS: [f64; 4] = [160.0, -86.0, 179.0, -77.0];

    /// Shackleton Glacier region
    pub const SHACKLETON: [f64; 4] = [-176.0, -86.0, -170.0, -84.0];

    /// Single point (zero area)
    pub const POINT: [f64; 4] = [10.0, 10.0, 10.0, 10.0];
}

/// `/keys` body for a `[region, band]` catalog.
pub fn keys_body() -> Value {
    json!({
        "keys": [
            {"key": "region", "description": "Glacier or ice shelf"},
            {"key": "band", "description": "Spectral band"}
        ]
    })
}

/// `/datasets` body with one entry per `(region, band)` pair.
pub fn datasets_body(entries: &[(&str, &str)], limit: u32, page: u32) -> Value {
    let datasets: Vec<Value> = entries
        .iter()
        .map(|(region, band)| json!({"region": region, "band": band}))
        .collect();
    json!({"datasets": datasets, "limit": limit, "page": page})
}

/// `/metadata/<region>/<band>` body.
pub fn metadata_body(region: &str, band: &str, bounds: [f64; 4]) -> Value {
    let [w, s, e, n] = bounds;
    json!({
        "keys": {"region": region, "band": band},
        "bounds": bounds,
        "convex_hull": {
            "type": "Polygon",
            "coordinates": [[[w, s], [e, s], [e, n], [w, n], [w, s]]]
        },
        "nodata": 0.0,
        "range": [0.0, 233.18781],
        "mean": 101.2549,
        "stdev": 12.3456,
        "percentiles": [1.0, 5.0, 50.0, 95.0, 99.0],
        "valid_percentage": 87.5,
        "metadata": {}
    })
}

/// `/colormap` body with `num_values` grey ramp samples.
pub fn colormap_body(num_values: usize) -> Value {
    let samples: Vec<Value> = (0..num_values)
        .map(|i| {
            let v = if num_values > 1 {
                i as f64 / (num_values - 1) as f64
            } else {
                0.0
            };
            let c = (v * 255.0).round() as u8;
            json!({"value": v, "rgba": [c, c, c, 255]})
        })
        .collect();
    json!({"colormap": samples})
}

/// Region hierarchy with one nested subregion.
pub fn regions_body() -> Value {
    json!([
        {
            "name": "Ross Ice Shelf",
            "id": 1,
            "subregions": [
                {"name": "Shackleton Glacier", "id": "2"}
            ]
        },
        {"name": "Amery", "id": 3}
    ])
}
