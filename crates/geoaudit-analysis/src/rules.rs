//! Geometric rule detector
//!
//! Deterministic threshold rules evaluated on raw geometry, independent of
//! the statistical ensemble. Per-feature evaluation is a pure function of
//! that feature's geometry.

use std::sync::Arc;

use geoaudit_core::config::AnalysisConfig;
use geoaudit_core::models::{FeatureCollection, GeometricFinding, RuleViolation};
use geoaudit_core::ports::GeometryEngine;

pub struct GeometricRuleDetector {
    engine: Arc<dyn GeometryEngine>,
    config: AnalysisConfig,
}

impl GeometricRuleDetector {
    pub fn new(engine: Arc<dyn GeometryEngine>, config: AnalysisConfig) -> Self {
        Self { engine, config }
    }

    /// One finding per feature with at least one violation; clean features
    /// are omitted
    pub fn detect(&self, collection: &FeatureCollection) -> Vec<GeometricFinding> {
        collection.iter().filter_map(|f| self.inspect(f)).collect()
    }

    fn inspect(
        &self,
        feature: &geoaudit_core::models::Feature,
    ) -> Option<GeometricFinding> {
        let mut issues = Vec::new();

        if self.engine.area(&feature.geometry) < self.config.min_area {
            issues.push(RuleViolation::ExtremelySmallArea);
        }

        // Aspect ratio only applies to geometries with an exterior ring;
        // points and lines are exempt
        if feature.geometry_type.has_exterior() {
            if let Some(bounds) = self.engine.bounds(&feature.geometry) {
                let ratio = bounds.width() / bounds.height();
                if ratio > self.config.max_aspect_ratio || ratio < self.config.min_aspect_ratio
                {
                    issues.push(RuleViolation::ExtremeAspectRatio);
                }
            }
        }

        (!issues.is_empty()).then(|| GeometricFinding {
            feature_id: feature.id,
            issues,
            geometry_type: feature.geometry_type,
        })
    }
}
