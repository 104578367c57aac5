//! Viewport auto-fit heuristic.

use terracotta_common::BoundingBox;

/// Coverage below which selecting a dataset moves the camera.
pub const DEFAULT_FIT_THRESHOLD: f64 = 0.1;

/// Fraction of the visible `screen` area covered by `dataset`.
///
/// A screen of zero area has nothing to cover and reports `0.0`.
pub fn coverage_ratio(dataset: &BoundingBox, screen: &BoundingBox) -> f64 {
    let screen_area = screen.area();
    if screen_area <= 0.0 || !screen_area.is_finite() {
        return 0.0;
    }
    dataset.overlap_area(screen) / screen_area
}

/// Whether the camera should fly to `dataset` given the current `screen`.
pub fn should_fit(dataset: &BoundingBox, screen: &BoundingBox, threshold: f64) -> bool {
    coverage_ratio(dataset, screen) < threshold
}
