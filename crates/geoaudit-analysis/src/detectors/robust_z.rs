//! Median/MAD outlier model
//!
//! The ensemble's primary one-pass detector. Each column is centered on
//! its median and scaled by its median absolute deviation; a row's score
//! is the largest absolute robust z-score across columns. Rows whose
//! score exceeds a fixed cutoff are flagged, capped at a contamination
//! fraction of the matrix so a pathological column cannot flag everything.

use geoaudit_core::ports::{FeatureMatrix, OutlierModel};
use geoaudit_core::{GeoAuditError, Result};

/// Conventional robust z-score cutoff
const Z_CUTOFF: f64 = 3.5;
/// Consistency factor relating MAD to the standard deviation
const MAD_SCALE: f64 = 1.4826;
/// Below this, a column is treated as constant
const MIN_SPREAD: f64 = 1e-12;

pub struct RobustZScoreModel {
    contamination: f64,
}

impl RobustZScoreModel {
    pub fn new(contamination: f64) -> Self {
        Self { contamination }
    }

    fn scores(&self, matrix: &FeatureMatrix) -> Result<Vec<f64>> {
        if matrix.n_rows() == 0 {
            return Err(GeoAuditError::detector(self.name(), "empty feature matrix"));
        }

        let mut scores = vec![0.0_f64; matrix.n_rows()];
        for col in 0..matrix.n_cols() {
            let values = matrix.column(col);
            let center = median(values.clone());
            let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
            let spread = median(deviations) * MAD_SCALE;
            if spread < MIN_SPREAD {
                // Constant column: no row deviates
                continue;
            }

            for (row, value) in values.iter().enumerate() {
                let z = (value - center).abs() / spread;
                if z > scores[row] {
                    scores[row] = z;
                }
            }
        }
        Ok(scores)
    }
}

impl OutlierModel for RobustZScoreModel {
    fn name(&self) -> &str {
        "robust_z_score"
    }

    fn fit_predict(&self, matrix: &FeatureMatrix) -> Result<Vec<bool>> {
        let scores = self.scores(matrix)?;

        // Cap the flag count at the contamination fraction, keeping the
        // rows with the largest scores
        let cap = ((self.contamination * matrix.n_rows() as f64).ceil() as usize).max(1);
        let mut candidates: Vec<usize> = (0..scores.len())
            .filter(|&row| scores[row] > Z_CUTOFF)
            .collect();
        candidates.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        candidates.truncate(cap);

        let mut labels = vec![false; scores.len()];
        for row in candidates {
            labels[row] = true;
        }
        Ok(labels)
    }

    fn decision_function(&self, matrix: &FeatureMatrix) -> Option<Vec<f64>> {
        self.scores(matrix).ok()
    }
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_with_one_outlier() -> FeatureMatrix {
        let mut rows: Vec<Vec<f64>> = (0..9)
            .map(|i| vec![1.0 + 0.01 * i as f64, 4.0 + 0.01 * i as f64])
            .collect();
        rows.push(vec![500.0, 4.05]);
        FeatureMatrix::new(rows)
    }

    #[test]
    fn test_flags_the_deviant_row() {
        let model = RobustZScoreModel::new(0.1);
        let labels = model.fit_predict(&matrix_with_one_outlier()).unwrap();

        assert_eq!(labels.iter().filter(|&&f| f).count(), 1);
        assert!(labels[9]);
    }

    #[test]
    fn test_identical_rows_flag_nothing() {
        let matrix = FeatureMatrix::new(vec![vec![1.0, 4.0, 1.0]; 20]);
        let labels = RobustZScoreModel::new(0.1).fit_predict(&matrix).unwrap();
        assert!(labels.iter().all(|&f| !f));
    }

    #[test]
    fn test_empty_matrix_is_an_error() {
        let result = RobustZScoreModel::new(0.1).fit_predict(&FeatureMatrix::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_contamination_caps_flag_count() {
        // Five rows are far out, but contamination 0.1 on 25 rows keeps
        // only the three with the largest scores
        let mut rows: Vec<Vec<f64>> = (0..20).map(|i| vec![1.0 + 0.01 * i as f64]).collect();
        rows.extend((0..5).map(|i| vec![1000.0 + 100.0 * i as f64]));
        let matrix = FeatureMatrix::new(rows);

        let labels = RobustZScoreModel::new(0.1).fit_predict(&matrix).unwrap();
        assert_eq!(labels.iter().filter(|&&f| f).count(), 3);
        assert!(labels[24] && labels[23] && labels[22]);
    }

    #[test]
    fn test_decision_function_scores_every_row() {
        let matrix = matrix_with_one_outlier();
        let scores = RobustZScoreModel::new(0.1).decision_function(&matrix).unwrap();
        assert_eq!(scores.len(), matrix.n_rows());
        assert!(scores[9] > scores[0]);
    }
}
