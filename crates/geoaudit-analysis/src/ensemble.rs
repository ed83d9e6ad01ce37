//! Statistical anomaly ensemble
//!
//! Derives a numeric feature matrix from the collection — one row per
//! feature: area, perimeter, compactness ratio, vertex count — and runs an
//! ordered registry of outlier models over it. A model that fails is
//! logged and skipped; it contributes no signal and never aborts the
//! others. Only when every model fails does the ensemble come back empty,
//! which the orchestrator reports as a partial result.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use geoaudit_core::config::AnalysisConfig;
use geoaudit_core::models::{AnomalySignal, FeatureCollection};
use geoaudit_core::ports::{FeatureMatrix, GeometryEngine, OutlierModel};

use crate::detectors::{NearestNeighborModel, RobustZScoreModel};

/// Result of one ensemble run. Failed models are recorded by name so the
/// caller can distinguish "no signal" from "detector failed".
#[derive(Debug, Default)]
pub struct EnsembleOutcome {
    pub signals: Vec<AnomalySignal>,
    pub failed_models: Vec<String>,
}

impl EnsembleOutcome {
    pub fn degraded(&self) -> bool {
        !self.failed_models.is_empty()
    }
}

/// Ordered registry of outlier models over the derived feature matrix
pub struct StatisticalEnsemble {
    engine: Arc<dyn GeometryEngine>,
    models: Vec<Box<dyn OutlierModel>>,
    config: AnalysisConfig,
}

impl StatisticalEnsemble {
    /// Ensemble with the default model registry. The robust z-score model
    /// comes first and acts as the primary signal for the risk scorer.
    pub fn new(engine: Arc<dyn GeometryEngine>, config: AnalysisConfig) -> Self {
        let models: Vec<Box<dyn OutlierModel>> = vec![
            Box::new(RobustZScoreModel::new(config.contamination)),
            Box::new(NearestNeighborModel::new(config.neighbors, config.spread_factor)),
        ];
        Self { engine, models, config }
    }

    /// Ensemble with an explicit model registry (order matters: the first
    /// model is the primary signal)
    pub fn with_models(
        engine: Arc<dyn GeometryEngine>,
        config: AnalysisConfig,
        models: Vec<Box<dyn OutlierModel>>,
    ) -> Self {
        Self { engine, models, config }
    }

    /// One row per feature: area, perimeter/length, compactness ratio
    /// (convex-hull area over geometry area, epsilon-guarded), vertex count
    pub fn derive_matrix(&self, collection: &FeatureCollection) -> FeatureMatrix {
        let epsilon = self.config.compactness_epsilon;
        let rows = collection
            .iter()
            .map(|feature| {
                let geometry = &feature.geometry;
                let area = self.engine.area(geometry);
                let length = self.engine.length(geometry);
                let compactness = self.engine.convex_hull_area(geometry) / (area + epsilon);
                let vertices = self.engine.vertex_count(geometry) as f64;
                vec![area, length, compactness, vertices]
            })
            .collect();
        FeatureMatrix::new(rows)
    }

    /// Run every registered model; flagged row indices become feature ids
    pub fn detect(&self, collection: &FeatureCollection) -> EnsembleOutcome {
        let matrix = self.derive_matrix(collection);
        let mut outcome = EnsembleOutcome::default();

        for model in &self.models {
            match model.fit_predict(&matrix) {
                Ok(labels) => {
                    let anomaly_feature_ids: Vec<usize> = labels
                        .iter()
                        .enumerate()
                        .filter(|(_, &flagged)| flagged)
                        .map(|(row, _)| row)
                        .collect();

                    let scores = model.decision_function(&matrix).map(|values| {
                        values.into_iter().enumerate().collect::<BTreeMap<usize, f64>>()
                    });

                    debug!(
                        model = model.name(),
                        flagged = anomaly_feature_ids.len(),
                        "outlier model finished"
                    );
                    outcome.signals.push(AnomalySignal {
                        detector_name: model.name().to_string(),
                        anomaly_feature_ids,
                        scores,
                    });
                }
                Err(error) => {
                    warn!(model = model.name(), error = %error, "outlier model failed, skipping");
                    outcome.failed_models.push(model.name().to_string());
                }
            }
        }
        outcome
    }
}
