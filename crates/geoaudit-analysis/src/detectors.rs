//! Built-in outlier model implementations
//!
//! Both models implement the `OutlierModel` port over the derived feature
//! matrix. The ensemble treats them like any externally supplied model.

pub mod nearest;
pub mod robust_z;

pub use nearest::NearestNeighborModel;
pub use robust_z::RobustZScoreModel;
