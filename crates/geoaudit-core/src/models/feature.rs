//! Canonical feature types used across all geoaudit crates.
//!
//! Features carry their geometry as `geo` crate types so the analysis
//! pipeline can apply exact predicates without conversion.

use geo::algorithm::bounding_rect::BoundingRect;
use geo::Geometry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coordinate Reference System identified by EPSG code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crs {
    pub epsg: u32,
    pub name: String,
}

impl Crs {
    pub fn new(epsg: u32, name: impl Into<String>) -> Self {
        Self { epsg, name: name.into() }
    }

    /// WGS 84 (EPSG:4326)
    pub fn wgs84() -> Self {
        Self::new(4326, "WGS 84")
    }
}

/// Axis-aligned bounds: (min_x, min_y, max_x, max_y)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Bounds of a single geometry, if it has any coordinates
    pub fn of(geometry: &Geometry<f64>) -> Option<Self> {
        geometry.bounding_rect().map(|rect| {
            Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
        })
    }

    /// Smallest bounds covering both inputs
    pub fn union(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Geometry type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    /// Classify a `geo` geometry. Rect and Triangle count as Polygon.
    pub fn of(geometry: &Geometry<f64>) -> Self {
        match geometry {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::Line(_) | Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => {
                GeometryType::Polygon
            }
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Whether this geometry kind carries an exterior ring
    pub fn has_exterior(&self) -> bool {
        matches!(self, GeometryType::Polygon)
    }
}

/// Scalar attribute value attached to a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// Convert a JSON property value. Non-scalar values are kept as their
    /// JSON text so no attribute is silently dropped.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => AttributeValue::Null,
            serde_json::Value::Bool(b) => AttributeValue::Bool(*b),
            serde_json::Value::Number(n) => {
                AttributeValue::Number(n.as_f64().unwrap_or(f64::NAN))
            }
            serde_json::Value::String(s) => AttributeValue::Text(s.clone()),
            other => AttributeValue::Text(other.to_string()),
        }
    }
}

/// Attribute map for one feature
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// One geographic entity: geometry plus attributes.
///
/// Features are immutable once constructed; a repaired feature is a new
/// `Feature`, never an in-place mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Stable 0-based index within the collection, assigned at load time
    pub id: usize,
    pub geometry: Geometry<f64>,
    pub attributes: AttributeMap,
    pub geometry_type: GeometryType,
}

impl Feature {
    pub fn new(id: usize, geometry: Geometry<f64>, attributes: AttributeMap) -> Self {
        let geometry_type = GeometryType::of(&geometry);
        Self { id, geometry, attributes, geometry_type }
    }
}

/// Ordered sequence of features plus collection-level metadata.
///
/// Invariant: every feature's `id` equals its position. Both constructors
/// enforce this by assigning ids positionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    features: Vec<Feature>,
    /// Declared CRS; absence is itself a defect the validator flags
    pub crs: Option<Crs>,
    /// Total spatial bounds over all features; `None` for empty collections
    pub bounds: Option<Bounds>,
}

impl FeatureCollection {
    /// Build a collection from (geometry, attributes) pairs, assigning
    /// positional ids and computing the total bounds.
    pub fn from_parts(
        parts: Vec<(Geometry<f64>, AttributeMap)>,
        crs: Option<Crs>,
    ) -> Self {
        let features: Vec<Feature> = parts
            .into_iter()
            .enumerate()
            .map(|(id, (geometry, attributes))| Feature::new(id, geometry, attributes))
            .collect();

        let bounds = features
            .iter()
            .filter_map(|f| Bounds::of(&f.geometry))
            .reduce(Bounds::union);

        Self { features, crs, bounds }
    }

    /// Convenience constructor for geometries without attributes
    pub fn from_geometries(geometries: Vec<Geometry<f64>>, crs: Option<Crs>) -> Self {
        Self::from_parts(
            geometries.into_iter().map(|g| (g, AttributeMap::new())).collect(),
            crs,
        )
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, Point};

    #[test]
    fn test_positional_id_assignment() {
        let collection = FeatureCollection::from_geometries(
            vec![
                Point::new(0.0, 0.0).into(),
                Point::new(1.0, 1.0).into(),
                Point::new(2.0, 2.0).into(),
            ],
            Some(Crs::wgs84()),
        );

        for (position, feature) in collection.iter().enumerate() {
            assert_eq!(feature.id, position);
        }
    }

    #[test]
    fn test_total_bounds_union() {
        let collection = FeatureCollection::from_geometries(
            vec![Point::new(-10.0, 5.0).into(), Point::new(20.0, -3.0).into()],
            None,
        );

        let bounds = collection.bounds.unwrap();
        assert_eq!(bounds.min_x, -10.0);
        assert_eq!(bounds.min_y, -3.0);
        assert_eq!(bounds.max_x, 20.0);
        assert_eq!(bounds.max_y, 5.0);
    }

    #[test]
    fn test_empty_collection_has_no_bounds() {
        let collection = FeatureCollection::from_geometries(vec![], None);
        assert!(collection.is_empty());
        assert!(collection.bounds.is_none());
    }

    #[test]
    fn test_geometry_type_classification() {
        let poly = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        assert_eq!(GeometryType::of(&poly.into()), GeometryType::Polygon);
        assert!(GeometryType::Polygon.has_exterior());
        assert!(!GeometryType::Point.has_exterior());
        assert!(!GeometryType::MultiPolygon.has_exterior());
    }

    #[test]
    fn test_attribute_value_from_json() {
        assert_eq!(
            AttributeValue::from_json(&serde_json::json!(3.5)),
            AttributeValue::Number(3.5)
        );
        assert_eq!(
            AttributeValue::from_json(&serde_json::json!("name")),
            AttributeValue::Text("name".to_string())
        );
        assert_eq!(
            AttributeValue::from_json(&serde_json::Value::Null),
            AttributeValue::Null
        );
        // Nested structures are preserved as JSON text
        assert_eq!(
            AttributeValue::from_json(&serde_json::json!([1, 2])),
            AttributeValue::Text("[1,2]".to_string())
        );
    }
}
