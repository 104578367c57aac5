//! Request URL assembly.
//!
//! Every builder is a pure function of its arguments. Malformed inputs such
//! as an empty RGB band list still produce a syntactically valid URL; the
//! server decides what it means.

use terracotta_common::{serialize_keys, DatasetKey, KeyConstraint};

/// Tile size requested for preview thumbnails.
pub const THUMBNAIL_SIZE: [u32; 2] = [128, 128];

/// Which image a tile URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TilePath {
    /// `{z}/{x}/{y}.png` template consumed by the map widget
    #[default]
    Xyz,
    /// Single `preview.png` of the given tile size
    Preview([u32; 2]),
}

impl TilePath {
    fn path(&self) -> String {
        match self {
            TilePath::Xyz => "{z}/{x}/{y}.png".to_string(),
            TilePath::Preview([w, h]) => format!("preview.png?tile_size=[{},{}]", w, h),
        }
    }

    fn has_query(&self) -> bool {
        matches!(self, TilePath::Preview(_))
    }
}

/// Query options appended to tile URLs, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerOptions {
    pairs: Vec<(String, String)>,
}

impl LayerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option. Re-inserting a key replaces its value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Append `key=value` pairs; the first uses `?` unless the URL
    /// already carries a query string.
    fn append_to(&self, url: &mut String, mut has_query: bool) {
        for (key, value) in self.iter() {
            url.push(if has_query { '&' } else { '?' });
            url.push_str(key);
            url.push('=');
            url.push_str(value);
            has_query = true;
        }
    }
}

/// `<host>/keys`
pub fn keys_url(host: &str) -> String {
    format!("{}/keys", host)
}

/// `<host>/datasets?limit=..&page=..` plus one parameter per constraint, in order.
pub fn datasets_url(host: &str, constraints: &[KeyConstraint], limit: u32, page: u32) -> String {
    let mut url = format!("{}/datasets?limit={}&page={}", host, limit, page);
    for constraint in constraints {
        url.push('&');
        url.push_str(&constraint.key);
        url.push('=');
        url.push_str(&constraint.value);
    }
    url
}

/// `<host>/metadata/<k1>/<k2>/...`
pub fn metadata_url(host: &str, key: &DatasetKey) -> String {
    let mut url = format!("{}/metadata", host);
    for component in key.components() {
        url.push('/');
        url.push_str(component);
    }
    url
}

/// Single-band tile or preview URL. No query string is added for `None` options.
pub fn singleband_url<S: AsRef<str>>(
    host: &str,
    keys: &[S],
    options: Option<&LayerOptions>,
    path: TilePath,
) -> String {
    let mut url = format!("{}/singleband/{}/{}", host, serialize_keys(keys), path.path());
    if let Some(options) = options {
        options.append_to(&mut url, path.has_query());
    }
    url
}

/// RGB composite tile or preview URL.
///
/// `shared_keys` are the leading key components common to all three bands;
/// `rgb_keys` holds the last key component of the red, green and blue bands.
pub fn rgb_url<S: AsRef<str>, T: AsRef<str>>(
    host: &str,
    shared_keys: &[S],
    rgb_keys: &[T],
    options: Option<&LayerOptions>,
    path: TilePath,
) -> String {
    let mut url = format!("{}/rgb/", host);
    if !shared_keys.is_empty() {
        url.push_str(&serialize_keys(shared_keys));
        url.push('/');
    }
    url.push_str(&path.path());

    let band = |i: usize| rgb_keys.get(i).map(AsRef::as_ref).unwrap_or("");
    url.push(if path.has_query() { '&' } else { '?' });
    url.push_str(&format!("r={}&g={}&b={}", band(0), band(1), band(2)));

    if let Some(options) = options {
        options.append_to(&mut url, true);
    }
    url
}

/// `<host>/colormap?colormap=<id>&stretch_range=[0,1]&num_values=<n>`
pub fn colormap_url(host: &str, colormap: &str, num_values: u32) -> String {
    format!(
        "{}/colormap?colormap={}&stretch_range=[0,1]&num_values={}",
        host, colormap, num_values
    )
}

/// Strip a single trailing `/` from a configured host.
pub fn sanitize_host(host: &str) -> String {
    host.strip_suffix('/').unwrap_or(host).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "http://host";

    #[test]
    fn test_singleband_without_options() {
        assert_eq!(
            singleband_url(HOST, &["R", "B"], None, TilePath::Xyz),
            "http://host/singleband/R/B/{z}/{x}/{y}.png"
        );
    }

    #[test]
    fn test_singleband_with_colormap() {
        let options = LayerOptions::new().with("colormap", "greys_r");
        assert_eq!(
            singleband_url(HOST, &["R", "B"], Some(&options), TilePath::Xyz),
            "http://host/singleband/R/B/{z}/{x}/{y}.png?colormap=greys_r"
        );
    }

    #[test]
    fn test_options_keep_insertion_order() {
        let options = LayerOptions::new()
            .with("stretch_range", "[0,1]")
            .with("colormap", "viridis");
        assert_eq!(
            singleband_url(HOST, &["R"], Some(&options), TilePath::Xyz),
            "http://host/singleband/R/{z}/{x}/{y}.png?stretch_range=[0,1]&colormap=viridis"
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut options = LayerOptions::new().with("colormap", "a").with("x", "1");
        options.insert("colormap", "b");
        let pairs: Vec<_> = options.iter().collect();
        assert_eq!(pairs, vec![("colormap", "b"), ("x", "1")]);
    }

    #[test]
    fn test_sanitize_host() {
        assert_eq!(sanitize_host("http://host/"), "http://host");
        assert_eq!(sanitize_host("http://host"), "http://host");
    }
}
