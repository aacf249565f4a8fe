//! Configuration loading and typed config structures for the hazard map.
//!
//! The configuration lives in `hazard-map.yaml`. This module defines
//! strongly-typed structs that mirror the YAML structure, a loader that
//! reads the file, and validation of the clustering and budget policies.
//! Every field has a default, so an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use hazard_types::{CategoryId, GeoPoint};
use serde::{Deserialize, Serialize};

use crate::cluster::MIN_CHUNK_SIZE;
use crate::filter::CategoryFilter;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an unusable policy.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level map configuration, mirroring `hazard-map.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Initial viewport.
    #[serde(default)]
    pub view: ViewConfig,

    /// Initial category filter.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Grid clustering policy.
    #[serde(default)]
    pub clustering: ClusterPolicy,

    /// Marker budget policy.
    #[serde(default)]
    pub budget: BudgetPolicy,

    /// Event feed source.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MapConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `EONET_FEED_URL` overrides `feed.url`
    /// - `HAZARD_FEED_PATH` overrides `feed.path`
    /// - `HAZARD_MAP_ZOOM` overrides `view.zoom`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// Unlike [`Self::from_file`], environment overrides are not applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("EONET_FEED_URL") {
            self.feed.url = val;
        }
        if let Ok(val) = std::env::var("HAZARD_FEED_PATH") {
            self.feed.path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("HAZARD_MAP_ZOOM") {
            match val.parse::<f64>() {
                Ok(zoom) => self.view.zoom = zoom,
                Err(e) => tracing::warn!(value = %val, error = %e, "ignoring invalid HAZARD_MAP_ZOOM"),
            }
        }
    }

    /// Check the policies for values the pipeline cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clustering.validate()?;
        self.budget.validate()?;
        if !self.view.zoom.is_finite() || self.view.zoom < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "view.zoom must be a non-negative number, got {}",
                self.view.zoom
            )));
        }
        Ok(())
    }
}

/// A zoom bracket: applies when `zoom >= min_zoom`.
///
/// Tier lists are ordered from the highest `min_zoom` down; the first match
/// wins and a base value covers zooms below every tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTier<T> {
    /// Lowest zoom level this tier applies to.
    pub min_zoom: f64,
    /// Value in effect for the tier.
    pub value: T,
}

impl<T> ZoomTier<T> {
    /// Create a tier.
    pub const fn new(min_zoom: f64, value: T) -> Self {
        Self { min_zoom, value }
    }
}

/// Resolve the value for `zoom` from a descending tier list.
pub fn tier_value<T: Copy>(tiers: &[ZoomTier<T>], zoom: f64, base: T) -> T {
    tiers
        .iter()
        .find(|t| zoom >= t.min_zoom)
        .map_or(base, |t| t.value)
}

fn validate_tiers<T>(name: &str, tiers: &[ZoomTier<T>]) -> Result<(), ConfigError> {
    for pair in tiers.windows(2) {
        if let [hi, lo] = pair
            && hi.min_zoom <= lo.min_zoom
        {
            return Err(ConfigError::Invalid(format!(
                "{name} must be ordered by descending min_zoom ({} then {})",
                hi.min_zoom, lo.min_zoom
            )));
        }
    }
    if tiers.iter().any(|t| !t.min_zoom.is_finite()) {
        return Err(ConfigError::Invalid(format!("{name} has a non-finite min_zoom")));
    }
    Ok(())
}

/// Viewport configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Initial zoom level.
    #[serde(default = "default_zoom")]
    pub zoom: f64,

    /// Initial map center.
    #[serde(default = "default_center")]
    pub center: GeoPoint,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            center: default_center(),
        }
    }
}

/// Initial filter-panel state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Start in show-all mode.
    #[serde(default = "default_true")]
    pub show_all: bool,

    /// Exclusions when `show_all` is set, selections otherwise.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            show_all: true,
            categories: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// Build the filter state this configuration describes.
    pub fn to_filter(&self) -> CategoryFilter {
        let mut filter = CategoryFilter::new();
        filter.set_all_mode(self.show_all);
        for id in &self.categories {
            // Checked in selection mode, unchecked in show-all mode.
            filter.toggle_category(&CategoryId::new(id.as_str()), !self.show_all);
        }
        filter
    }
}

/// Grid clustering policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPolicy {
    /// At or above this zoom every event gets its own marker.
    #[serde(default = "default_disable_at_zoom")]
    pub disable_at_zoom: f64,

    /// Cells per degree by zoom tier, highest tier first.
    #[serde(default = "default_grid_tiers")]
    pub grid_tiers: Vec<ZoomTier<u32>>,

    /// Cells per degree below every tier.
    #[serde(default = "default_base_grid")]
    pub base_grid: u32,

    /// Cells with at most this many events are never merged.
    #[serde(default = "default_sparse_cell_max")]
    pub sparse_cell_max: usize,

    /// Dense cells are split into about this many chunks.
    #[serde(default = "default_min_markers_per_cell")]
    pub min_markers_per_cell: usize,
}

impl Default for ClusterPolicy {
    fn default() -> Self {
        Self {
            disable_at_zoom: default_disable_at_zoom(),
            grid_tiers: default_grid_tiers(),
            base_grid: default_base_grid(),
            sparse_cell_max: default_sparse_cell_max(),
            min_markers_per_cell: default_min_markers_per_cell(),
        }
    }
}

impl ClusterPolicy {
    /// Whether clustering is switched off at this zoom.
    pub fn is_disabled_at(&self, zoom: f64) -> bool {
        zoom >= self.disable_at_zoom
    }

    /// Grid cells per degree at this zoom.
    pub fn grid_size(&self, zoom: f64) -> u32 {
        tier_value(&self.grid_tiers, zoom, self.base_grid)
    }

    /// Check the policy for unusable values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] on a zero grid size, on chunk
    /// settings that would let a dense cell collapse into one marker, or on
    /// misordered tiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_grid == 0 || self.grid_tiers.iter().any(|t| t.value == 0) {
            return Err(ConfigError::Invalid(
                "clustering grid sizes must be positive".to_owned(),
            ));
        }
        if self.min_markers_per_cell < MIN_CHUNK_SIZE {
            return Err(ConfigError::Invalid(format!(
                "clustering.min_markers_per_cell must be at least {MIN_CHUNK_SIZE}, got {}",
                self.min_markers_per_cell
            )));
        }
        // A dense cell must hold more events than one minimum-size chunk.
        let sparse_floor = MIN_CHUNK_SIZE.max(self.min_markers_per_cell.saturating_sub(1));
        if self.sparse_cell_max < sparse_floor {
            return Err(ConfigError::Invalid(format!(
                "clustering.sparse_cell_max must be at least {sparse_floor}, got {}",
                self.sparse_cell_max
            )));
        }
        validate_tiers("clustering.grid_tiers", &self.grid_tiers)
    }
}

/// Marker budget policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPolicy {
    /// Marker cap by zoom tier, highest tier first.
    #[serde(default = "default_budget_tiers")]
    pub tiers: Vec<ZoomTier<usize>>,

    /// Marker cap below every tier.
    #[serde(default = "default_base_max")]
    pub base_max: usize,

    /// Side length of a sampling region, in degrees.
    #[serde(default = "default_region_degrees")]
    pub region_degrees: f64,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            tiers: default_budget_tiers(),
            base_max: default_base_max(),
            region_degrees: default_region_degrees(),
        }
    }
}

impl BudgetPolicy {
    /// Maximum markers drawn at this zoom.
    pub fn max_markers(&self, zoom: f64) -> usize {
        tier_value(&self.tiers, zoom, self.base_max)
    }

    /// Check the policy for unusable values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] on a non-positive region size or
    /// misordered tiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.region_degrees.is_finite() || self.region_degrees <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "budget.region_degrees must be positive, got {}",
                self.region_degrees
            )));
        }
        validate_tiers("budget.tiers", &self.tiers)
    }
}

/// Where the event feed comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// EONET events endpoint.
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// Local feed document; takes precedence over `url` when set.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// HTTP timeout for the one-shot fetch.
    #[serde(default = "default_feed_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            path: None,
            timeout_ms: default_feed_timeout_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG`
    /// is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_zoom() -> f64 {
    5.0
}

const fn default_center() -> GeoPoint {
    GeoPoint::new(-77.0369, 38.9072)
}

const fn default_disable_at_zoom() -> f64 {
    8.0
}

fn default_grid_tiers() -> Vec<ZoomTier<u32>> {
    vec![ZoomTier::new(6.0, 2), ZoomTier::new(4.0, 4)]
}

const fn default_base_grid() -> u32 {
    6
}

const fn default_sparse_cell_max() -> usize {
    3
}

const fn default_min_markers_per_cell() -> usize {
    2
}

fn default_budget_tiers() -> Vec<ZoomTier<usize>> {
    vec![
        ZoomTier::new(10.0, 3000),
        ZoomTier::new(8.0, 1500),
        ZoomTier::new(6.0, 800),
    ]
}

const fn default_base_max() -> usize {
    400
}

const fn default_region_degrees() -> f64 {
    10.0
}

fn default_feed_url() -> String {
    "https://eonet.gsfc.nasa.gov/api/v3/events".to_owned()
}

const fn default_feed_timeout_ms() -> u64 {
    15_000
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = MapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.clustering.base_grid, 6);
        assert_eq!(config.budget.base_max, 400);
        assert!(config.filter.show_all);
        assert!(config.feed.path.is_none());
    }

    #[test]
    fn grid_size_follows_zoom_tiers() {
        let p = ClusterPolicy::default();
        assert_eq!(p.grid_size(0.0), 6);
        assert_eq!(p.grid_size(3.9), 6);
        assert_eq!(p.grid_size(4.0), 4);
        assert_eq!(p.grid_size(5.5), 4);
        assert_eq!(p.grid_size(6.0), 2);
        assert_eq!(p.grid_size(7.9), 2);
        assert!(!p.is_disabled_at(7.99));
        assert!(p.is_disabled_at(8.0));
    }

    #[test]
    fn max_markers_follows_zoom_tiers() {
        let p = BudgetPolicy::default();
        assert_eq!(p.max_markers(0.0), 400);
        assert_eq!(p.max_markers(5.9), 400);
        assert_eq!(p.max_markers(6.0), 800);
        assert_eq!(p.max_markers(8.0), 1500);
        assert_eq!(p.max_markers(9.5), 1500);
        assert_eq!(p.max_markers(10.0), 3000);
        assert_eq!(p.max_markers(21.0), 3000);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
view:
  zoom: 3
  center:
    lat: 10.5
    lon: -20.25

filter:
  show_all: false
  categories:
    - wildfires
    - volcanoes

clustering:
  disable_at_zoom: 9
  base_grid: 8
  sparse_cell_max: 5
  min_markers_per_cell: 3
  grid_tiers:
    - { min_zoom: 5, value: 3 }

budget:
  base_max: 100
  region_degrees: 5
  tiers:
    - { min_zoom: 7, value: 250 }

feed:
  url: "http://localhost:9000/events"
  path: "fixtures/events.json"
  timeout_ms: 500

logging:
  level: "debug"
"#;

        let config = MapConfig::parse(yaml);
        assert!(config.is_ok(), "parse failed: {config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.view.center, GeoPoint::new(-20.25, 10.5));
        assert!(!config.filter.show_all);
        assert_eq!(config.clustering.grid_size(6.0), 3);
        assert_eq!(config.clustering.grid_size(1.0), 8);
        assert_eq!(config.budget.max_markers(7.0), 250);
        assert_eq!(config.budget.max_markers(2.0), 100);
        assert_eq!(config.feed.timeout_ms, 500);
        assert_eq!(config.feed.path, Some(PathBuf::from("fixtures/events.json")));
        assert_eq!(config.logging.level, "debug");

        let filter = config.filter.to_filter();
        assert!(filter.is_visible(&CategoryId::new("wildfires")));
        assert!(!filter.is_visible(&CategoryId::new("floods")));
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = MapConfig::parse("view:\n  zoom: 9\n");
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();
        assert_eq!(config.view.zoom.to_bits(), 9.0_f64.to_bits());
        assert_eq!(config.clustering, ClusterPolicy::default());
        assert_eq!(config.budget, BudgetPolicy::default());
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(MapConfig::parse("").is_ok());
    }

    #[test]
    fn exclusions_from_config() {
        let config = FilterConfig {
            show_all: true,
            categories: vec!["floods".to_owned()],
        };
        let filter = config.to_filter();
        assert!(filter.show_all());
        assert!(!filter.is_visible(&CategoryId::new("floods")));
        assert!(filter.is_visible(&CategoryId::new("snow")));
    }

    #[test]
    fn rejects_zero_grid() {
        let result = MapConfig::parse("clustering:\n  base_grid: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_single_marker_dense_cells() {
        let result = MapConfig::parse("clustering:\n  min_markers_per_cell: 1\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_sparse_threshold_below_chunk_size() {
        for yaml in [
            "clustering:\n  sparse_cell_max: 1\n",
            "clustering:\n  sparse_cell_max: 0\n",
            "clustering:\n  sparse_cell_max: 3\n  min_markers_per_cell: 5\n",
        ] {
            let result = MapConfig::parse(yaml);
            assert!(matches!(result, Err(ConfigError::Invalid(_))), "accepted {yaml:?}");
        }
    }

    #[test]
    fn accepts_smallest_usable_chunk_settings() {
        let yaml = "clustering:\n  sparse_cell_max: 2\n  min_markers_per_cell: 2\n";
        assert!(MapConfig::parse(yaml).is_ok());
    }

    #[test]
    fn rejects_misordered_tiers() {
        let yaml = "budget:\n  tiers:\n    - { min_zoom: 6, value: 800 }\n    - { min_zoom: 10, value: 3000 }\n";
        assert!(matches!(MapConfig::parse(yaml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_non_positive_region() {
        let yaml = "budget:\n  region_degrees: 0\n";
        assert!(matches!(MapConfig::parse(yaml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_invalid_yaml() {
        assert!(matches!(
            MapConfig::parse("view: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("hazard-map.yaml");
        if path.exists() {
            let config = MapConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
