//! Validation and analysis report types.
//!
//! Reports are pure computed values: created once, returned, discarded.
//! Issues are immutable facts produced by checks and are never merged or
//! deduplicated across checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

use super::feature::{FeatureCollection, GeometryType};

/// Ordered severity scale: low < medium < high < critical
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Kinds of validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    FileReadError,
    InvalidGeometry,
    SelfIntersection,
    InvalidCoordinateRange,
    #[serde(rename = "MissingCRS")]
    MissingCrs,
}

/// One fact raised by a validation check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// Absent for dataset-level issues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_id: Option<usize>,
    pub message: String,
    pub severity: Severity,
    /// Advisory text only, never executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_suggestion: Option<String>,
}

impl ValidationIssue {
    /// Issue attributed to a single feature
    pub fn for_feature(
        kind: IssueKind,
        feature_id: usize,
        severity: Severity,
        message: impl Into<String>,
        repair_suggestion: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            feature_id: Some(feature_id),
            message: message.into(),
            severity,
            repair_suggestion: Some(repair_suggestion.into()),
        }
    }

    /// Dataset-level issue with no feature attribution
    pub fn dataset_level(
        kind: IssueKind,
        severity: Severity,
        message: impl Into<String>,
        repair_suggestion: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            feature_id: None,
            message: message.into(),
            severity,
            repair_suggestion: Some(repair_suggestion.into()),
        }
    }
}

/// Result of running the validation pipeline over one collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True iff zero issues were raised by any check
    pub file_valid: bool,
    pub feature_count: usize,
    /// Check order, then feature order
    pub issues: Vec<ValidationIssue>,
    /// Present only when the file is invalid and repair succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repaired_collection: Option<FeatureCollection>,
}

impl ValidationReport {
    /// Report for input that could not be interpreted as a feature
    /// collection at all. The pipeline never raises past its boundary.
    pub fn read_failure(reason: impl Display) -> Self {
        Self {
            file_valid: false,
            feature_count: 0,
            issues: vec![ValidationIssue {
                kind: IssueKind::FileReadError,
                feature_id: None,
                message: format!("Could not read file: {reason}"),
                severity: Severity::Critical,
                repair_suggestion: None,
            }],
            repaired_collection: None,
        }
    }
}

/// Output of one outlier detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalySignal {
    pub detector_name: String,
    /// Feature ids flagged as outliers, in id order
    pub anomaly_feature_ids: Vec<usize>,
    /// Per-feature decision scores; absent when the method has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<BTreeMap<usize, f64>>,
}

/// Threshold rules a feature can violate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleViolation {
    ExtremelySmallArea,
    ExtremeAspectRatio,
}

/// Rule-based finding for one feature; a feature may accumulate several
/// violations in a single finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometricFinding {
    pub feature_id: usize,
    pub issues: Vec<RuleViolation>,
    pub geometry_type: GeometryType,
}

/// Opaque summary from the optional semantic-segmentation capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationSummary {
    pub model: String,
    pub summary: String,
}

/// Overall analysis outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
    Partial,
    Error,
}

/// Final anomaly report for one collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub status: AnalysisStatus,
    pub analyzed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub statistical_signals: Vec<AnomalySignal>,
    pub geometric_findings: Vec<GeometricFinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segmentation: Option<SegmentationSummary>,
    /// Bounded triage heuristic in [0, 1]. Monotone in anomaly count but
    /// NOT a calibrated probability; see the risk scorer's docs.
    pub composite_risk_score: f64,
}

impl AnalysisReport {
    /// Error report: message only, no partial data structure
    pub fn failed(reason: impl Display) -> Self {
        Self {
            status: AnalysisStatus::Error,
            analyzed_at: Utc::now(),
            error: Some(reason.to_string()),
            statistical_signals: Vec::new(),
            geometric_findings: Vec::new(),
            segmentation: None,
            composite_risk_score: 0.0,
        }
    }
}
