//! Nearest-neighbor novelty model
//!
//! Novelty-style detector: it fits on a reference subset — conventionally
//! every row except the last — and then predicts over the full matrix. A
//! row is an outlier when its mean distance to the k nearest reference
//! rows exceeds the reference set's own spread.
//!
//! The all-but-last reference split assumes the last row is safe to
//! exclude as the implicit held-out set. That makes the model meaningless
//! for single-feature collections: with fewer than two rows it returns an
//! error and the ensemble skips it.

use geoaudit_core::ports::{FeatureMatrix, OutlierModel};
use geoaudit_core::{GeoAuditError, Result};

const MIN_SPREAD: f64 = 1e-12;

pub struct NearestNeighborModel {
    neighbors: usize,
    spread_factor: f64,
}

impl NearestNeighborModel {
    pub fn new(neighbors: usize, spread_factor: f64) -> Self {
        Self { neighbors, spread_factor }
    }

    /// Mean distance from each row to its k nearest reference rows, after
    /// standardizing columns by the reference distribution so no single
    /// column dominates the metric.
    fn scores(&self, matrix: &FeatureMatrix) -> Result<Vec<f64>> {
        let n = matrix.n_rows();
        if n < 2 {
            return Err(GeoAuditError::detector(
                self.name(),
                "needs at least 2 rows to hold out a reference set",
            ));
        }

        let reference = matrix.head(n - 1);
        let scaling = column_scaling(&reference);
        let reference_rows: Vec<Vec<f64>> = reference
            .rows()
            .map(|row| standardize(row, &scaling))
            .collect();

        let k = self.neighbors.min(reference_rows.len().saturating_sub(1)).max(1);

        let scores = (0..n)
            .map(|row| {
                let point = standardize(matrix.row(row), &scaling);
                // A row inside the reference set must not count its own
                // zero distance
                let own_index = (row < reference_rows.len()).then_some(row);
                knn_distance(&point, &reference_rows, own_index, k)
            })
            .collect();
        Ok(scores)
    }
}

impl OutlierModel for NearestNeighborModel {
    fn name(&self) -> &str {
        "nearest_neighbor"
    }

    fn fit_predict(&self, matrix: &FeatureMatrix) -> Result<Vec<bool>> {
        let scores = self.scores(matrix)?;

        // Threshold from the reference set's own neighbor distances
        let reference_scores = &scores[..matrix.n_rows() - 1];
        let mean = reference_scores.iter().sum::<f64>() / reference_scores.len() as f64;
        let variance = reference_scores
            .iter()
            .map(|s| (s - mean).powi(2))
            .sum::<f64>()
            / reference_scores.len() as f64;
        let threshold = mean + self.spread_factor * variance.sqrt().max(MIN_SPREAD);

        Ok(scores.iter().map(|&score| score > threshold).collect())
    }

    fn decision_function(&self, matrix: &FeatureMatrix) -> Option<Vec<f64>> {
        self.scores(matrix).ok()
    }
}

/// Per-column (mean, std) over the reference rows; constant columns get a
/// unit scale so they contribute nothing after centering
fn column_scaling(reference: &FeatureMatrix) -> Vec<(f64, f64)> {
    let rows = reference.n_rows() as f64;
    (0..reference.n_cols())
        .map(|col| {
            let values = reference.column(col);
            let mean = values.iter().sum::<f64>() / rows;
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / rows;
            let std = variance.sqrt();
            (mean, if std < MIN_SPREAD { 1.0 } else { std })
        })
        .collect()
}

fn standardize(row: &[f64], scaling: &[(f64, f64)]) -> Vec<f64> {
    row.iter()
        .zip(scaling)
        .map(|(value, (mean, std))| (value - mean) / std)
        .collect()
}

fn knn_distance(
    point: &[f64],
    reference: &[Vec<f64>],
    own_index: Option<usize>,
    k: usize,
) -> f64 {
    let mut distances: Vec<f64> = reference
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != own_index)
        .map(|(_, other)| euclidean(point, other))
        .collect();
    distances.sort_by(f64::total_cmp);
    distances.truncate(k);

    if distances.is_empty() {
        0.0
    } else {
        distances.iter().sum::<f64>() / distances.len() as f64
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
