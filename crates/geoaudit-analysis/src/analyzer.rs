//! Analysis orchestrator
//!
//! Sequences the statistical ensemble and the geometric rule detector,
//! optionally invokes the segmentation capability, and merges everything
//! into one `AnalysisReport`. All collaborators are injected, immutable,
//! and shared by reference — nothing here holds request state.

use std::sync::Arc;
use tracing::warn;

use chrono::Utc;

use geoaudit_core::config::AnalysisConfig;
use geoaudit_core::models::{
    AnalysisReport, AnalysisStatus, FeatureCollection, SegmentationSummary,
};
use geoaudit_core::ports::{GeometryEngine, OutlierModel, Segmenter};

use crate::ensemble::StatisticalEnsemble;
use crate::rules::GeometricRuleDetector;
use crate::score::composite_risk_score;

pub struct Analyzer {
    ensemble: StatisticalEnsemble,
    rules: GeometricRuleDetector,
    segmenter: Option<Arc<dyn Segmenter>>,
}

impl Analyzer {
    /// Analyzer with the default outlier model registry
    pub fn new(engine: Arc<dyn GeometryEngine>, config: AnalysisConfig) -> Self {
        Self {
            ensemble: StatisticalEnsemble::new(engine.clone(), config.clone()),
            rules: GeometricRuleDetector::new(engine, config),
            segmenter: None,
        }
    }

    /// Analyzer with an explicit model registry
    pub fn with_models(
        engine: Arc<dyn GeometryEngine>,
        config: AnalysisConfig,
        models: Vec<Box<dyn OutlierModel>>,
    ) -> Self {
        Self {
            ensemble: StatisticalEnsemble::with_models(engine.clone(), config.clone(), models),
            rules: GeometricRuleDetector::new(engine, config),
            segmenter: None,
        }
    }

    /// Attach the optional segmentation capability
    pub fn with_segmenter(mut self, segmenter: Arc<dyn Segmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    /// Produce the anomaly report for one collection.
    ///
    /// Zero anomalies is a successful outcome with a score of 0. The
    /// status degrades to `partial` when some signal source failed; the
    /// optional segmenter never affects the status.
    pub fn analyze(&self, collection: &FeatureCollection) -> AnalysisReport {
        let outcome = self.ensemble.detect(collection);
        let findings = self.rules.detect(collection);
        let segmentation = self.run_segmenter(collection);

        let composite_risk_score = composite_risk_score(&outcome.signals, &findings);
        let status = if outcome.degraded() {
            AnalysisStatus::Partial
        } else {
            AnalysisStatus::Success
        };

        AnalysisReport {
            status,
            analyzed_at: Utc::now(),
            error: None,
            statistical_signals: outcome.signals,
            geometric_findings: findings,
            segmentation,
            composite_risk_score,
        }
    }

    fn run_segmenter(&self, collection: &FeatureCollection) -> Option<SegmentationSummary> {
        let segmenter = self.segmenter.as_ref()?;
        match segmenter.segment(collection) {
            Ok(summary) => Some(summary),
            Err(error) => {
                // Unavailability is a normal state for this capability
                warn!(segmenter = segmenter.name(), error = %error, "segmentation unavailable");
                None
            }
        }
    }
}
