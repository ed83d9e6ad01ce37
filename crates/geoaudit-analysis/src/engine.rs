//! `geo`-backed geometry engine
//!
//! Implements the `GeometryEngine` port with the `geo` crate's exact
//! predicates. Simplicity is decided by pairwise segment intersection over
//! each ring or path, skipping adjacent segments (which always share an
//! endpoint).

mod repair;

use geo::{
    Area, BoundingRect, ConvexHull, CoordsIter, Euclidean, Geometry, Intersects, Length, Line,
    LineString, MultiPoint, Point, Polygon, Validation,
};

use geoaudit_core::models::Bounds;
use geoaudit_core::ports::GeometryEngine;
use geoaudit_core::Result;

/// Geometry engine backed by the `geo` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoEngine;

impl GeometryEngine for GeoEngine {
    fn is_valid(&self, geometry: &Geometry<f64>) -> bool {
        geometry.is_valid()
    }

    fn explain_invalidity(&self, geometry: &Geometry<f64>) -> String {
        match geometry.check_validation() {
            Ok(()) => "Valid Geometry".to_string(),
            Err(problem) => problem.to_string(),
        }
    }

    fn is_simple(&self, geometry: &Geometry<f64>) -> bool {
        match geometry {
            Geometry::Polygon(polygon) => polygon_is_simple(polygon),
            Geometry::MultiPolygon(mp) => mp.0.iter().all(polygon_is_simple),
            Geometry::LineString(line) => path_is_simple(line),
            Geometry::MultiLineString(mls) => mls.0.iter().all(path_is_simple),
            Geometry::GeometryCollection(gc) => gc.0.iter().all(|g| self.is_simple(g)),
            // Points and the convex primitive types cannot self-intersect
            _ => true,
        }
    }

    fn area(&self, geometry: &Geometry<f64>) -> f64 {
        geometry.unsigned_area()
    }

    fn length(&self, geometry: &Geometry<f64>) -> f64 {
        perimeter(geometry)
    }

    fn bounds(&self, geometry: &Geometry<f64>) -> Option<Bounds> {
        Bounds::of(geometry)
    }

    fn convex_hull_area(&self, geometry: &Geometry<f64>) -> f64 {
        let points: Vec<Point<f64>> = geometry.coords_iter().map(Point::from).collect();
        if points.len() < 3 {
            return 0.0;
        }
        MultiPoint::new(points).convex_hull().unsigned_area()
    }

    fn vertex_count(&self, geometry: &Geometry<f64>) -> usize {
        geometry.coords_count()
    }

    fn repair(&self, geometry: &Geometry<f64>) -> Result<Geometry<f64>> {
        repair::make_valid(geometry)
    }
}

/// Perimeter for areal types, path length for linear types, 0 for points
fn perimeter(geometry: &Geometry<f64>) -> f64 {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => 0.0,
        Geometry::Line(line) => Euclidean.length(line),
        Geometry::LineString(line) => Euclidean.length(line),
        Geometry::MultiLineString(mls) => Euclidean.length(mls),
        Geometry::Polygon(polygon) => polygon_perimeter(polygon),
        Geometry::MultiPolygon(mp) => mp.0.iter().map(polygon_perimeter).sum(),
        Geometry::Rect(rect) => polygon_perimeter(&rect.to_polygon()),
        Geometry::Triangle(triangle) => polygon_perimeter(&triangle.to_polygon()),
        Geometry::GeometryCollection(gc) => gc.0.iter().map(perimeter).sum(),
    }
}

fn polygon_perimeter(polygon: &Polygon<f64>) -> f64 {
    let exterior = Euclidean.length(polygon.exterior());
    let interiors: f64 = polygon
        .interiors()
        .iter()
        .map(|ring| Euclidean.length(ring))
        .sum();
    exterior + interiors
}

fn polygon_is_simple(polygon: &Polygon<f64>) -> bool {
    path_is_simple(polygon.exterior())
        && polygon.interiors().iter().all(path_is_simple)
}

/// No two non-adjacent segments of the path may intersect. Adjacent
/// segments share an endpoint by construction, and a closed path's first
/// and last segments are adjacent through the closure point.
fn path_is_simple(path: &LineString<f64>) -> bool {
    let segments: Vec<Line<f64>> = path.lines().collect();
    let count = segments.len();
    let closed = path.is_closed();

    for i in 0..count {
        for j in (i + 2)..count {
            if closed && i == 0 && j == count - 1 {
                continue;
            }
            if segments[i].intersects(&segments[j]) {
                return false;
            }
        }
    }
    true
}
