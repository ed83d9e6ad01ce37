//! Validation pipeline
//!
//! An ordered registry of independent checks runs over the same input
//! collection. Checks never observe each other's results; registration
//! order only affects the order of issues in the report. When any issue is
//! raised, the pipeline attempts automatic repair of the invalid
//! geometries, producing a new collection and leaving the original
//! untouched.

mod checks;

pub use checks::{
    AttributeConsistencyCheck, CoordinateRangeCheck, CrsCheck, SelfIntersectionCheck,
    ValidityCheck,
};

use std::sync::Arc;
use tracing::warn;

use geoaudit_core::models::{FeatureCollection, ValidationIssue, ValidationReport};
use geoaudit_core::ports::GeometryEngine;

/// A single validation check run against the whole collection
pub trait ValidationCheck: Send + Sync {
    fn name(&self) -> &str;

    /// Zero or more issues; an empty result means the check passed
    fn run(
        &self,
        collection: &FeatureCollection,
        engine: &dyn GeometryEngine,
    ) -> Vec<ValidationIssue>;
}

/// Runs the check registry and assembles the validation report
pub struct Validator {
    engine: Arc<dyn GeometryEngine>,
    checks: Vec<Box<dyn ValidationCheck>>,
}

impl Validator {
    /// Validator with the default check registry
    pub fn new(engine: Arc<dyn GeometryEngine>) -> Self {
        Self {
            engine,
            checks: vec![
                Box::new(ValidityCheck),
                Box::new(SelfIntersectionCheck),
                Box::new(CoordinateRangeCheck),
                Box::new(AttributeConsistencyCheck),
                Box::new(CrsCheck),
            ],
        }
    }

    /// Register an additional check after the defaults
    pub fn with_check(mut self, check: Box<dyn ValidationCheck>) -> Self {
        self.checks.push(check);
        self
    }

    /// Run every check and, when the collection is invalid, attempt repair.
    ///
    /// `file_valid` is true iff the union of all checks' issues is empty.
    pub fn validate(&self, collection: &FeatureCollection) -> ValidationReport {
        let mut issues = Vec::new();
        for check in &self.checks {
            issues.extend(check.run(collection, self.engine.as_ref()));
        }

        let file_valid = issues.is_empty();
        let repaired_collection = if file_valid {
            None
        } else {
            self.attempt_repair(collection)
        };

        ValidationReport {
            file_valid,
            feature_count: collection.len(),
            issues,
            repaired_collection,
        }
    }

    /// Replace every invalid geometry with the engine's repaired version;
    /// features that already pass are kept as-is. Any repair failure drops
    /// the repaired collection entirely — the issues already describe what
    /// is wrong, so this is recorded, not escalated.
    fn attempt_repair(&self, collection: &FeatureCollection) -> Option<FeatureCollection> {
        let mut parts = Vec::with_capacity(collection.len());
        for feature in collection.iter() {
            if self.engine.is_valid(&feature.geometry) {
                parts.push((feature.geometry.clone(), feature.attributes.clone()));
            } else {
                match self.engine.repair(&feature.geometry) {
                    Ok(geometry) => parts.push((geometry, feature.attributes.clone())),
                    Err(error) => {
                        warn!(feature_id = feature.id, error = %error, "geometry repair failed");
                        return None;
                    }
                }
            }
        }
        Some(FeatureCollection::from_parts(parts, collection.crs.clone()))
    }
}
