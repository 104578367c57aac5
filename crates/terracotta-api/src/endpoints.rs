//! Typed decoding of endpoint responses.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use terracotta_common::{
    ClientError, ClientResult, ColormapEntry, DatasetListing, KeyDescriptor, Metadata, Rgba,
};

fn decode<T: DeserializeOwned>(url: &str, value: Value) -> ClientResult<T> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

#[derive(Deserialize)]
struct KeysResponse {
    #[serde(default)]
    keys: Vec<KeyDescriptor>,
}

#[derive(Deserialize)]
struct ColormapResponse {
    #[serde(default)]
    colormap: Option<Vec<ColormapEntry>>,
}

/// `/keys` body. A missing `keys` field is an empty list.
pub fn decode_keys(url: &str, value: Value) -> ClientResult<Vec<KeyDescriptor>> {
    decode::<KeysResponse>(url, value).map(|r| r.keys)
}

/// `/datasets` body.
pub fn decode_datasets(url: &str, value: Value) -> ClientResult<DatasetListing> {
    decode(url, value)
}

/// `/metadata/...` body.
pub fn decode_metadata(url: &str, value: Value) -> ClientResult<Metadata> {
    decode(url, value)
}

/// `/colormap` body, truncated to the first `num_values` samples.
///
/// Returns `Ok(None)` when the body has no `colormap` field.
pub fn decode_colormap(url: &str, value: Value, num_values: usize) -> ClientResult<Option<Vec<Rgba>>> {
    let response: ColormapResponse = decode(url, value)?;
    Ok(response
        .colormap
        .map(|entries| entries.into_iter().take(num_values).map(|e| e.rgba).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_default_to_empty() {
        assert!(decode_keys("u", json!({})).unwrap().is_empty());
        let keys = decode_keys("u", json!({"keys": [{"key": "region"}, {"key": "band", "description": "Band"}]}))
            .unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[1].description.as_deref(), Some("Band"));
    }

    #[test]
    fn test_colormap_truncates_and_handles_missing() {
        let body = json!({"colormap": [
            {"value": 0.0, "rgba": [0, 0, 0, 255]},
            {"value": 0.5, "rgba": [128, 128, 128, 255]},
            {"value": 1.0, "rgba": [255, 255, 255, 255]}
        ]});
        let values = decode_colormap("u", body, 2).unwrap().unwrap();
        assert_eq!(values, vec![Rgba::new(0, 0, 0, 255), Rgba::new(128, 128, 128, 255)]);
        assert_eq!(decode_colormap("u", json!({}), 2).unwrap(), None);
    }

    #[test]
    fn test_metadata_decode_error_carries_url() {
        let err = decode_metadata("http://host/metadata/a", json!({"keys": {}})).unwrap_err();
        assert!(matches!(err, ClientError::Decode { ref url, .. } if url == "http://host/metadata/a"));
    }
}
