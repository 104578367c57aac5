//! Viewer configuration.
//!
//! Defaults, optionally overlaid by a YAML file, then by environment
//! variables. Command-line flags are applied by the binary last.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use terracotta_api::urls::{sanitize_host, THUMBNAIL_SIZE};
use terracotta_common::{default_colormaps, ColormapDescriptor, StretchRange};

use crate::viewport::DEFAULT_FIT_THRESHOLD;

/// Environment variable overriding `remote_host`.
pub const ENV_HOST: &str = "TERRACOTTA_HOST";

/// Environment variable overriding `datasets_per_page`.
pub const ENV_PAGE_SIZE: &str = "DATASETS_PER_PAGE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Base URL of the Terracotta server
    pub remote_host: String,

    /// Page size of the dataset listing
    pub datasets_per_page: u32,

    /// Samples requested per colormap
    pub colormap_num_values: u32,

    /// Tile size of preview thumbnails
    pub thumbnail_size: [u32; 2],

    /// Stretch range applied before the user picks one
    pub default_stretch: StretchRange,

    /// Coverage ratio below which selecting a layer moves the viewport
    pub fit_threshold: f64,

    /// Prefix of the downloadable mosaic links
    pub export_base: String,

    /// Colormaps offered in the selector; the first is selected initially
    pub colormaps: Vec<ColormapDescriptor>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            remote_host: String::new(),
            datasets_per_page: 100,
            colormap_num_values: 100,
            thumbnail_size: THUMBNAIL_SIZE,
            default_stretch: StretchRange::default(),
            fit_threshold: DEFAULT_FIT_THRESHOLD,
            export_base: "/static/mosaics/optimized".to_string(),
            colormaps: default_colormaps(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a YAML file. Missing fields take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: ViewerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        info!(path = %path.display(), "Loaded viewer config");
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from a variable lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = lookup(ENV_HOST) {
            debug!(host = %host, "Remote host from environment");
            self.remote_host = host;
        }
        if let Some(per_page) = lookup(ENV_PAGE_SIZE) {
            self.datasets_per_page = per_page
                .parse()
                .with_context(|| format!("{} must be an integer, got '{}'", ENV_PAGE_SIZE, per_page))?;
        }
        Ok(())
    }

    /// Remote host without a trailing slash.
    pub fn host(&self) -> String {
        sanitize_host(&self.remote_host)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.datasets_per_page == 0 {
            bail!("datasets_per_page must be > 0");
        }
        if self.colormaps.is_empty() {
            bail!("at least one colormap must be configured");
        }
        if !(0.0..=1.0).contains(&self.fit_threshold) {
            bail!("fit_threshold must be within [0, 1]");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.datasets_per_page, 100);
        assert_eq!(config.colormaps[0].id, "greys_r");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "remote_host: http://tc.example/\ndatasets_per_page: 16").unwrap();

        let config = ViewerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.datasets_per_page, 16);
        assert_eq!(config.host(), "http://tc.example");
        assert_eq!(config.colormap_num_values, 100);
    }

    #[test]
    fn test_yaml_rejects_inverted_stretch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_stretch: [5.0, 1.0]").unwrap();
        assert!(ViewerConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = ViewerConfig::default();
        config
            .apply_overrides(|name| match name {
                ENV_HOST => Some("http://env.host".to_string()),
                ENV_PAGE_SIZE => Some("25".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.remote_host, "http://env.host");
        assert_eq!(config.datasets_per_page, 25);

        assert!(config
            .apply_overrides(|name| (name == ENV_PAGE_SIZE).then(|| "many".to_string()))
            .is_err());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let config = ViewerConfig {
            datasets_per_page: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
