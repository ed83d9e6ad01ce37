//! Analysis configuration
//!
//! Values resolve with the precedence: defaults < TOML file < environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::{GeoAuditError, Result};

/// Thresholds and knobs for the validation and anomaly pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Area below which a feature is flagged `extremely_small_area`
    pub min_area: f64,
    /// Bounding-box width/height ratio above which a polygon is flagged
    pub max_aspect_ratio: f64,
    /// Ratio below which a polygon is flagged
    pub min_aspect_ratio: f64,
    /// Additive guard for the compactness-ratio division when area ≈ 0
    pub compactness_epsilon: f64,
    /// Fraction of rows the primary outlier model may flag
    pub contamination: f64,
    /// Neighbor count used by the nearest-neighbor novelty model
    pub neighbors: usize,
    /// Multiples of the reference spread beyond which a row is an outlier
    pub spread_factor: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_area: 1e-6,
            max_aspect_ratio: 100.0,
            min_aspect_ratio: 0.01,
            compactness_epsilon: 1e-9,
            contamination: 0.1,
            neighbors: 3,
            spread_factor: 3.0,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file on top of the defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeoAuditError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {e}"),
            }
        })?;

        let config: AnalysisConfig =
            toml::from_str(&content).map_err(|e| GeoAuditError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {e}"),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `GEOAUDIT_*` environment overrides
    pub fn apply_env(mut self) -> Self {
        if let Some(value) = env_f64("GEOAUDIT_MIN_AREA") {
            self.min_area = value;
        }
        if let Some(value) = env_f64("GEOAUDIT_CONTAMINATION") {
            self.contamination = value;
        }
        if let Some(value) = env_f64("GEOAUDIT_MAX_ASPECT_RATIO") {
            self.max_aspect_ratio = value;
        }
        self
    }

    /// Resolve the full precedence chain
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        let config = config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.contamination > 0.0 && self.contamination < 1.0) {
            return Err(GeoAuditError::ConfigInvalid {
                key: "contamination".to_string(),
                reason: format!("must be in (0, 1), got {}", self.contamination),
            });
        }
        if self.min_aspect_ratio >= self.max_aspect_ratio {
            return Err(GeoAuditError::ConfigInvalid {
                key: "min_aspect_ratio".to_string(),
                reason: "must be below max_aspect_ratio".to_string(),
            });
        }
        if self.neighbors == 0 {
            return Err(GeoAuditError::ConfigInvalid {
                key: "neighbors".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn env_f64(key: &str) -> Option<f64> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}
