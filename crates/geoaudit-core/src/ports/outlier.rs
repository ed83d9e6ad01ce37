//! Outlier model capability

use crate::error::Result;

/// Numeric matrix derived from a feature collection, one row per feature.
///
/// Row index equals feature id (collections assign ids positionally), so
/// flagged row indices translate directly into feature ids.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureMatrix {
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Values of one column, in row order
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[index]).collect()
    }

    /// The first `count` rows as a new matrix. Used by novelty-style models
    /// that fit on a held-out reference subset before predicting.
    pub fn head(&self, count: usize) -> FeatureMatrix {
        FeatureMatrix::new(self.rows.iter().take(count).cloned().collect())
    }
}

/// Port for outlier detection models.
///
/// Models are stateless from the caller's perspective: `fit_predict` covers
/// both one-pass methods and novelty methods that internally fit on a
/// reference subset (conventionally all rows except the last) before
/// predicting on the full matrix.
pub trait OutlierModel: Send + Sync {
    fn name(&self) -> &str;

    /// One outlier flag per matrix row (`true` = outlier).
    ///
    /// A failing model returns an error; the ensemble skips it and keeps
    /// going, so errors here never abort an analysis.
    fn fit_predict(&self, matrix: &FeatureMatrix) -> Result<Vec<bool>>;

    /// Continuous per-row anomaly scores, if the method exposes them
    fn decision_function(&self, matrix: &FeatureMatrix) -> Option<Vec<f64>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_dimensions() {
        let matrix = FeatureMatrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        assert_eq!(matrix.n_rows(), 3);
        assert_eq!(matrix.n_cols(), 2);
        assert_eq!(matrix.column(1), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_matrix_row_iteration_preserves_order() {
        let matrix = FeatureMatrix::new(vec![vec![1.0], vec![2.0], vec![3.0]]);
        let firsts: Vec<f64> = matrix.rows().map(|row| row[0]).collect();
        assert_eq!(firsts, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_matrix_head_holds_out_tail() {
        let matrix = FeatureMatrix::new(vec![vec![1.0], vec![2.0], vec![3.0]]);
        let reference = matrix.head(matrix.n_rows() - 1);
        assert_eq!(reference.n_rows(), 2);
        assert_eq!(reference.row(1), &[2.0]);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = FeatureMatrix::default();
        assert_eq!(matrix.n_rows(), 0);
        assert_eq!(matrix.n_cols(), 0);
    }
}
