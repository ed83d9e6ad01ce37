pub mod feature;
pub mod report;

pub use feature::{AttributeValue, Bounds, Crs, Feature, FeatureCollection, GeometryType};
pub use report::{
    AnalysisReport, AnalysisStatus, AnomalySignal, GeometricFinding, IssueKind, RuleViolation,
    SegmentationSummary, Severity, ValidationIssue, ValidationReport,
};
