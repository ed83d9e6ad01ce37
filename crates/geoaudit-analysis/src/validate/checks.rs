//! Built-in validation checks

use geoaudit_core::models::{
    FeatureCollection, GeometryType, IssueKind, Severity, ValidationIssue,
};
use geoaudit_core::ports::GeometryEngine;

use super::ValidationCheck;

/// Longitude bound for geographic coordinates
const MAX_LONGITUDE: f64 = 180.0;
/// Latitude bound for geographic coordinates
const MAX_LATITUDE: f64 = 90.0;

/// Every feature's geometry must satisfy the engine's validity predicate
pub struct ValidityCheck;

impl ValidationCheck for ValidityCheck {
    fn name(&self) -> &str {
        "geometry_validity"
    }

    fn run(
        &self,
        collection: &FeatureCollection,
        engine: &dyn GeometryEngine,
    ) -> Vec<ValidationIssue> {
        collection
            .iter()
            .filter(|feature| !engine.is_valid(&feature.geometry))
            .map(|feature| {
                ValidationIssue::for_feature(
                    IssueKind::InvalidGeometry,
                    feature.id,
                    Severity::High,
                    engine.explain_invalidity(&feature.geometry),
                    "Rebuild the rings or apply a zero-width buffer",
                )
            })
            .collect()
    }
}

/// Polygonal features must be simple (no self-intersecting rings)
pub struct SelfIntersectionCheck;

impl ValidationCheck for SelfIntersectionCheck {
    fn name(&self) -> &str {
        "self_intersection"
    }

    fn run(
        &self,
        collection: &FeatureCollection,
        engine: &dyn GeometryEngine,
    ) -> Vec<ValidationIssue> {
        collection
            .iter()
            .filter(|feature| {
                matches!(
                    feature.geometry_type,
                    GeometryType::Polygon | GeometryType::MultiPolygon
                ) && !engine.is_simple(&feature.geometry)
            })
            .map(|feature| {
                ValidationIssue::for_feature(
                    IssueKind::SelfIntersection,
                    feature.id,
                    Severity::Medium,
                    "Geometry contains self-intersections",
                    "Simplify or reconstruct geometry",
                )
            })
            .collect()
    }
}

/// The collection's total bounds must lie within geographic range.
///
/// A violation yields one dataset-level issue; no attempt is made to
/// attribute it to a specific feature.
pub struct CoordinateRangeCheck;

impl ValidationCheck for CoordinateRangeCheck {
    fn name(&self) -> &str {
        "coordinate_range"
    }

    fn run(
        &self,
        collection: &FeatureCollection,
        _engine: &dyn GeometryEngine,
    ) -> Vec<ValidationIssue> {
        let Some(bounds) = collection.bounds else {
            return Vec::new();
        };

        let out_of_range = bounds.min_x.abs() > MAX_LONGITUDE
            || bounds.max_x.abs() > MAX_LONGITUDE
            || bounds.min_y.abs() > MAX_LATITUDE
            || bounds.max_y.abs() > MAX_LATITUDE;

        if out_of_range {
            vec![ValidationIssue::dataset_level(
                IssueKind::InvalidCoordinateRange,
                Severity::Critical,
                format!(
                    "Coordinates out of valid range (Bounds: {}, {}, {}, {})",
                    bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y
                ),
                "Reproject to proper CRS",
            )]
        } else {
            Vec::new()
        }
    }
}

/// Reserved extension point for attribute-schema uniformity checks
pub struct AttributeConsistencyCheck;

impl ValidationCheck for AttributeConsistencyCheck {
    fn name(&self) -> &str {
        "attribute_consistency"
    }

    fn run(
        &self,
        _collection: &FeatureCollection,
        _engine: &dyn GeometryEngine,
    ) -> Vec<ValidationIssue> {
        Vec::new()
    }
}

/// The collection must declare a coordinate reference system
pub struct CrsCheck;

impl ValidationCheck for CrsCheck {
    fn name(&self) -> &str {
        "crs_presence"
    }

    fn run(
        &self,
        collection: &FeatureCollection,
        _engine: &dyn GeometryEngine,
    ) -> Vec<ValidationIssue> {
        if collection.crs.is_none() {
            vec![ValidationIssue::dataset_level(
                IssueKind::MissingCrs,
                Severity::High,
                "No CRS defined",
                "Assign proper CRS",
            )]
        } else {
            Vec::new()
        }
    }
}
