//! Layer info panel text.

use terracotta_common::Metadata;

/// Summary line for the layer info panel.
///
/// Zero-valued statistics are omitted. The range is always shown as a JSON
/// array rounded to two decimals, and the free-form metadata mapping is
/// appended as JSON when it is not empty.
pub fn metadata_summary(metadata: &Metadata) -> String {
    let mut parts = Vec::new();

    if metadata.mean != 0.0 {
        parts.push(format!("mean: {:.2}", metadata.mean));
    }
    let [low, high] = metadata.range;
    parts.push(format!("range: [{},{}]", round2(low), round2(high)));
    if metadata.stdev != 0.0 {
        parts.push(format!("stdev: {:.2}", metadata.stdev));
    }
    if metadata.valid_percentage != 0.0 {
        parts.push(format!("valid_percentage: {:.2}", metadata.valid_percentage));
    }
    if !metadata.metadata.is_empty() {
        let json = serde_json::Value::Object(metadata.metadata.clone());
        parts.push(format!("metadata: {}", json));
    }

    parts.join(" ")
}

/// Round to two decimals, printed in shortest form (`233.19`, `0`).
fn round2(v: f64) -> f64 {
    // adding 0.0 turns -0.0 into 0.0
    (v * 100.0).round() / 100.0 + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(extra: serde_json::Value) -> Metadata {
        serde_json::from_value(json!({
            "keys": {"region": "Ross", "band": "blue"},
            "bounds": [0, 0, 1, 1],
            "range": [0.0, 233.18781],
            "mean": 101.2549,
            "stdev": 12.3456,
            "valid_percentage": 87.5,
            "metadata": extra
        }))
        .unwrap()
    }

    #[test]
    fn test_summary_two_decimals() {
        assert_eq!(
            metadata_summary(&metadata(json!({}))),
            "mean: 101.25 range: [0,233.19] stdev: 12.35 valid_percentage: 87.50"
        );
    }

    #[test]
    fn test_summary_includes_free_form_metadata() {
        let summary = metadata_summary(&metadata(json!({"sensor": "L8"})));
        assert!(summary.ends_with(r#" metadata: {"sensor":"L8"}"#));
    }

    #[test]
    fn test_zero_fields_omitted() {
        let mut m = metadata(json!({}));
        m.mean = 0.0;
        m.stdev = 0.0;
        assert_eq!(
            metadata_summary(&m),
            "range: [0,233.19] valid_percentage: 87.50"
        );
    }

    #[test]
    fn test_zero_range_still_shown() {
        let mut m = metadata(json!({}));
        m.range = [0.0, 0.0];
        m.mean = 0.0;
        m.stdev = 0.0;
        m.valid_percentage = 0.0;
        assert_eq!(metadata_summary(&m), "range: [0,0]");
    }

    #[test]
    fn test_range_rounding() {
        let mut m = metadata(json!({}));
        m.range = [-1.005e-3, 12.5];
        m.mean = 0.0;
        m.stdev = 0.0;
        m.valid_percentage = 0.0;
        assert_eq!(metadata_summary(&m), "range: [0,12.5]");
    }
}
