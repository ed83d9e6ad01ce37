//! Geometry engine capability

use geo::Geometry;

use crate::error::Result;
use crate::models::Bounds;

/// Port for exact geometric predicates and repair.
///
/// Implementations must be pure: no call mutates the input geometry, and
/// `repair` returns a new geometry, leaving the original untouched.
pub trait GeometryEngine: Send + Sync {
    /// Whether the geometry satisfies the engine's validity predicate
    fn is_valid(&self, geometry: &Geometry<f64>) -> bool;

    /// Human-readable explanation of why a geometry is invalid
    fn explain_invalidity(&self, geometry: &Geometry<f64>) -> String;

    /// Whether the geometry is simple (no self-intersections)
    fn is_simple(&self, geometry: &Geometry<f64>) -> bool;

    /// Unsigned area in coordinate units
    fn area(&self, geometry: &Geometry<f64>) -> f64;

    /// Perimeter or path length in coordinate units
    fn length(&self, geometry: &Geometry<f64>) -> f64;

    /// Bounding box, if the geometry has any coordinates
    fn bounds(&self, geometry: &Geometry<f64>) -> Option<Bounds>;

    /// Area of the convex hull of the geometry's vertices
    fn convex_hull_area(&self, geometry: &Geometry<f64>) -> f64;

    /// Total coordinate count
    fn vertex_count(&self, geometry: &Geometry<f64>) -> usize;

    /// Coerce an invalid geometry to a valid one.
    ///
    /// Repairing an already-valid geometry is a no-op clone. Fails with
    /// `GeoAuditError::RepairFailed` when no valid geometry can be produced.
    fn repair(&self, geometry: &Geometry<f64>) -> Result<Geometry<f64>>;
}
