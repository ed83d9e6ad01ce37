//! Error types for GeoAudit

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoAuditError {
    // Input errors
    #[error("Could not read feature collection: {reason}")]
    FileRead { reason: String },

    // Geometry errors
    #[error("Geometry repair failed: {reason}")]
    RepairFailed { reason: String },

    // Detector errors
    #[error("Detector {detector} failed: {reason}")]
    DetectorFailure { detector: String, reason: String },

    #[error("Segmentation unavailable: {reason}")]
    SegmentationUnavailable { reason: String },

    // Orchestration errors
    #[error("Analysis failed before any signal was computed: {reason}")]
    Orchestration { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeoAuditError {
    /// Per-model failure with the model's name attached
    pub fn detector(detector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DetectorFailure {
            detector: detector.into(),
            reason: reason.into(),
        }
    }

    /// Repair failure with context
    pub fn repair(reason: impl Into<String>) -> Self {
        Self::RepairFailed {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoAuditError>;
