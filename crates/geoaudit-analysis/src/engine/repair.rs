//! Geometry repair
//!
//! Strategy: normalize rings (deduplicate coordinates, close open rings,
//! drop degenerate rings) and revalidate; when normalization is not enough,
//! fall back to the convex hull of the original vertices. Repair always
//! produces a new geometry and never mutates its input.

use geo::{
    Area, ConvexHull, Coord, CoordsIter, Geometry, LineString, MultiPoint, MultiPolygon, Point,
    Polygon, Validation,
};
use tracing::debug;

use geoaudit_core::{GeoAuditError, Result};

const COORD_EPSILON: f64 = 1e-9;

pub(crate) fn make_valid(geometry: &Geometry<f64>) -> Result<Geometry<f64>> {
    // Repair of valid geometry is a no-op
    if geometry.is_valid() {
        return Ok(geometry.clone());
    }

    match geometry {
        Geometry::Polygon(polygon) => repair_polygon(polygon).map(Geometry::Polygon),
        Geometry::MultiPolygon(mp) => {
            let polygons = mp
                .0
                .iter()
                .map(repair_polygon)
                .collect::<Result<Vec<_>>>()?;
            Ok(Geometry::MultiPolygon(MultiPolygon::new(polygons)))
        }
        Geometry::LineString(line) => repair_line(line).map(Geometry::LineString),
        other => Err(GeoAuditError::repair(format!(
            "no repair strategy for this geometry kind: {}",
            kind_label(other)
        ))),
    }
}

fn repair_polygon(polygon: &Polygon<f64>) -> Result<Polygon<f64>> {
    // Many invalid polygons only suffer from unclosed or degenerate rings
    if let Some(exterior) = normalize_ring(polygon.exterior()) {
        let interiors: Vec<LineString<f64>> = polygon
            .interiors()
            .iter()
            .filter_map(normalize_ring)
            .collect();

        let candidate = Polygon::new(exterior, interiors);
        if candidate.is_valid() {
            debug!("polygon repaired by ring normalization");
            return Ok(candidate);
        }
    }

    convex_hull_fallback(polygon)
}

/// Deduplicate consecutive coordinates and close the ring. Rings with fewer
/// than four coordinates after normalization are degenerate.
fn normalize_ring(ring: &LineString<f64>) -> Option<LineString<f64>> {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len() + 1);
    for &coord in &ring.0 {
        if coords.last().map_or(true, |&last| !coords_equal(last, coord)) {
            coords.push(coord);
        }
    }

    if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
        if !coords_equal(first, last) {
            coords.push(first);
        }
    }

    (coords.len() >= 4).then(|| LineString::new(coords))
}

/// Last resort: replace the polygon with the convex hull of its exterior
/// vertices. Loses concavity and holes but always yields valid geometry
/// when the vertices span an area.
fn convex_hull_fallback(polygon: &Polygon<f64>) -> Result<Polygon<f64>> {
    let points: Vec<Point<f64>> = polygon.exterior().coords_iter().map(Point::from).collect();
    if points.len() < 3 {
        return Err(GeoAuditError::repair(
            "not enough vertices for a convex hull",
        ));
    }

    let hull = MultiPoint::new(points).convex_hull();
    if hull.is_valid() && hull.unsigned_area() > 0.0 {
        debug!("polygon repaired by convex hull fallback");
        Ok(hull)
    } else {
        Err(GeoAuditError::repair("convex hull is degenerate"))
    }
}

fn repair_line(line: &LineString<f64>) -> Result<LineString<f64>> {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(line.0.len());
    for &coord in &line.0 {
        if coords.last().map_or(true, |&last| !coords_equal(last, coord)) {
            coords.push(coord);
        }
    }

    if coords.len() >= 2 {
        Ok(LineString::new(coords))
    } else {
        Err(GeoAuditError::repair(
            "line collapses to a single coordinate",
        ))
    }
}

fn coords_equal(a: Coord<f64>, b: Coord<f64>) -> bool {
    (a.x - b.x).abs() < COORD_EPSILON && (a.y - b.y).abs() < COORD_EPSILON
}

fn kind_label(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
