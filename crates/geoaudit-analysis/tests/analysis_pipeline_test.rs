//! Integration tests for the analysis orchestrator
//!
//! Covers the status contract (success / partial), ensemble resilience,
//! the optional segmentation capability, and the composite score.

use std::sync::Arc;

use geo::{polygon, Geometry};
use geoaudit_analysis::{Analyzer, GeoEngine};
use geoaudit_core::config::AnalysisConfig;
use geoaudit_core::models::{
    AnalysisStatus, Crs, FeatureCollection, RuleViolation, SegmentationSummary,
};
use geoaudit_core::ports::{FeatureMatrix, OutlierModel, Segmenter};
use geoaudit_core::{GeoAuditError, Result};

struct FailingModel;

impl OutlierModel for FailingModel {
    fn name(&self) -> &str {
        "always_fails"
    }

    fn fit_predict(&self, _matrix: &FeatureMatrix) -> Result<Vec<bool>> {
        Err(GeoAuditError::detector(self.name(), "synthetic failure"))
    }

    fn decision_function(&self, _matrix: &FeatureMatrix) -> Option<Vec<f64>> {
        None
    }
}

struct QuietModel;

impl OutlierModel for QuietModel {
    fn name(&self) -> &str {
        "quiet"
    }

    fn fit_predict(&self, matrix: &FeatureMatrix) -> Result<Vec<bool>> {
        Ok(vec![false; matrix.n_rows()])
    }

    fn decision_function(&self, _matrix: &FeatureMatrix) -> Option<Vec<f64>> {
        None
    }
}

struct UnavailableSegmenter;

impl Segmenter for UnavailableSegmenter {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn segment(&self, _collection: &FeatureCollection) -> Result<SegmentationSummary> {
        Err(GeoAuditError::SegmentationUnavailable {
            reason: "model failed to initialize".to_string(),
        })
    }
}

struct StubSegmenter;

impl Segmenter for StubSegmenter {
    fn name(&self) -> &str {
        "stub"
    }

    fn segment(&self, _collection: &FeatureCollection) -> Result<SegmentationSummary> {
        Ok(SegmentationSummary {
            model: "stub".to_string(),
            summary: "analysis_complete".to_string(),
        })
    }
}

fn unit_square_at(offset: f64) -> Geometry<f64> {
    polygon![
        (x: offset, y: 0.0),
        (x: offset + 1.0, y: 0.0),
        (x: offset + 1.0, y: 1.0),
        (x: offset, y: 1.0),
    ]
    .into()
}

/// Identical well-behaved squares: no model or rule should flag anything
fn uniform_collection(count: usize) -> FeatureCollection {
    let geometries = (0..count).map(|i| unit_square_at(i as f64 * 3.0)).collect();
    FeatureCollection::from_geometries(geometries, Some(Crs::wgs84()))
}

fn analyzer_with(models: Vec<Box<dyn OutlierModel>>) -> Analyzer {
    Analyzer::with_models(Arc::new(GeoEngine), AnalysisConfig::default(), models)
}

#[test]
fn test_absence_of_anomalies_is_success_with_score_zero() {
    let analyzer = Analyzer::new(Arc::new(GeoEngine), AnalysisConfig::default());
    let report = analyzer.analyze(&uniform_collection(10));

    assert_eq!(report.status, AnalysisStatus::Success);
    assert!(report.error.is_none());
    assert!(report.geometric_findings.is_empty());
    assert_eq!(report.composite_risk_score, 0.0);
    for signal in &report.statistical_signals {
        assert!(signal.anomaly_feature_ids.is_empty());
    }
}

#[test]
fn test_one_failed_model_degrades_to_partial() {
    let analyzer = analyzer_with(vec![Box::new(FailingModel), Box::new(QuietModel)]);
    let report = analyzer.analyze(&uniform_collection(5));

    assert_eq!(report.status, AnalysisStatus::Partial);
    // The surviving model still contributed its signal
    assert_eq!(report.statistical_signals.len(), 1);
    assert_eq!(report.statistical_signals[0].detector_name, "quiet");
}

#[test]
fn test_all_models_failing_is_partial_with_no_signals() {
    let analyzer = analyzer_with(vec![Box::new(FailingModel), Box::new(FailingModel)]);
    let report = analyzer.analyze(&uniform_collection(5));

    assert_eq!(report.status, AnalysisStatus::Partial);
    assert!(report.statistical_signals.is_empty());
    assert_eq!(report.composite_risk_score, 0.0);
}

#[test]
fn test_geometric_findings_raise_the_score_without_statistical_flags() {
    // One absurdly elongated rectangle among normal squares
    let thin: Geometry<f64> = polygon![
        (x: 0.0, y: 0.0),
        (x: 1000.0, y: 0.0),
        (x: 1000.0, y: 1.0),
        (x: 0.0, y: 1.0),
    ]
    .into();
    let mut geometries: Vec<Geometry<f64>> =
        (0..6).map(|i| unit_square_at(i as f64 * 3.0 + 2000.0)).collect();
    geometries.push(thin);
    let collection = FeatureCollection::from_geometries(geometries, Some(Crs::wgs84()));

    let analyzer = analyzer_with(vec![Box::new(QuietModel)]);
    let report = analyzer.analyze(&collection);

    assert_eq!(report.status, AnalysisStatus::Success);
    assert_eq!(report.geometric_findings.len(), 1);
    assert_eq!(report.geometric_findings[0].feature_id, 6);
    assert!(report.geometric_findings[0]
        .issues
        .contains(&RuleViolation::ExtremeAspectRatio));
    // Findings alone push the score through the floored denominator
    assert!(report.composite_risk_score > 0.0);
}

#[test]
fn test_segmenter_failure_does_not_affect_results() {
    let analyzer =
        analyzer_with(vec![Box::new(QuietModel)]).with_segmenter(Arc::new(UnavailableSegmenter));
    let report = analyzer.analyze(&uniform_collection(4));

    assert_eq!(report.status, AnalysisStatus::Success);
    assert!(report.segmentation.is_none());
    assert_eq!(report.statistical_signals.len(), 1);
}

#[test]
fn test_segmenter_summary_is_attached_when_available() {
    let analyzer =
        analyzer_with(vec![Box::new(QuietModel)]).with_segmenter(Arc::new(StubSegmenter));
    let report = analyzer.analyze(&uniform_collection(4));

    let summary = report.segmentation.unwrap();
    assert_eq!(summary.summary, "analysis_complete");
}

#[test]
fn test_score_stays_bounded_with_many_findings() {
    // Every feature violates the small-area rule
    let geometries: Vec<Geometry<f64>> = (0..40)
        .map(|i| {
            let offset = i as f64;
            polygon![
                (x: offset, y: 0.0),
                (x: offset + 1e-4, y: 0.0),
                (x: offset + 1e-4, y: 1e-4),
                (x: offset, y: 1e-4),
            ]
            .into()
        })
        .collect();
    let collection = FeatureCollection::from_geometries(geometries, Some(Crs::wgs84()));

    let analyzer = analyzer_with(vec![Box::new(QuietModel)]);
    let report = analyzer.analyze(&collection);

    assert_eq!(report.geometric_findings.len(), 40);
    assert_eq!(report.composite_risk_score, 1.0);
}
