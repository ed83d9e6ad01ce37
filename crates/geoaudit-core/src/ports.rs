//! Port trait definitions
//!
//! These traits define the capability interfaces that adapters must
//! implement. The analysis pipeline only ever sees these traits, so
//! engines, outlier models, and segmenters are swappable collaborators.

pub mod geometry;
pub mod outlier;
pub mod segment;

pub use geometry::GeometryEngine;
pub use outlier::{FeatureMatrix, OutlierModel};
pub use segment::Segmenter;
