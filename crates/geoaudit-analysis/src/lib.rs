//! GeoAudit Analysis - validation pipeline, anomaly ensemble, risk scoring
//!
//! This crate implements the pipeline over the ports defined in
//! `geoaudit-core`: the `geo`-backed geometry engine, the ordered
//! validation check registry with automatic repair, the statistical
//! outlier ensemble, the geometric rule detector, and the orchestrator
//! that merges every signal into one composite risk score.

pub mod analyzer;
pub mod detectors;
pub mod engine;
pub mod ensemble;
pub mod rules;
pub mod score;
pub mod validate;

pub use analyzer::Analyzer;
pub use engine::GeoEngine;
pub use ensemble::{EnsembleOutcome, StatisticalEnsemble};
pub use rules::GeometricRuleDetector;
pub use score::composite_risk_score;
pub use validate::{ValidationCheck, Validator};
