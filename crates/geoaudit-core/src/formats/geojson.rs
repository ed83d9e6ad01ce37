//! GeoJSON format reader implementation

use async_trait::async_trait;
use std::fs;
use std::path::Path;

use crate::error::{GeoAuditError, Result};
use crate::formats::FormatReader;
use crate::models::{AttributeValue, Crs, FeatureCollection};
use crate::models::feature::AttributeMap;

/// GeoJSON format reader
#[derive(Debug)]
pub struct GeoJsonReader;

#[async_trait]
impl FormatReader for GeoJsonReader {
    async fn read(&self, path: &Path) -> Result<FeatureCollection> {
        let content = fs::read_to_string(path).map_err(|e| GeoAuditError::FileRead {
            reason: format!("{}: {e}", path.display()),
        })?;

        let geojson: geojson::GeoJson =
            content.parse().map_err(|e| GeoAuditError::FileRead {
                reason: format!("Failed to parse GeoJSON: {e}"),
            })?;

        collection_from_geojson(&geojson)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json", "geojson"]
    }

    fn format_name(&self) -> &str {
        "GeoJSON"
    }
}

/// Convert a parsed GeoJSON document into the core feature model.
///
/// Ids are positional. A missing `crs` foreign member yields `crs = None`
/// rather than defaulting to WGS 84, so the MissingCRS validation check can
/// observe the absence.
pub fn collection_from_geojson(geojson: &geojson::GeoJson) -> Result<FeatureCollection> {
    match geojson {
        geojson::GeoJson::FeatureCollection(fc) => {
            let crs = fc
                .foreign_members
                .as_ref()
                .and_then(|fm| fm.get("crs"))
                .and_then(extract_crs);

            let parts = fc
                .features
                .iter()
                .enumerate()
                .map(|(index, feature)| convert_feature(feature, index))
                .collect::<Result<Vec<_>>>()?;

            Ok(FeatureCollection::from_parts(parts, crs))
        }
        geojson::GeoJson::Feature(feature) => {
            let parts = vec![convert_feature(feature, 0)?];
            Ok(FeatureCollection::from_parts(parts, None))
        }
        geojson::GeoJson::Geometry(geometry) => {
            let geometry = convert_geometry(geometry, 0)?;
            Ok(FeatureCollection::from_parts(
                vec![(geometry, AttributeMap::new())],
                None,
            ))
        }
    }
}

fn convert_feature(
    feature: &geojson::Feature,
    index: usize,
) -> Result<(geo::Geometry<f64>, AttributeMap)> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| GeoAuditError::FileRead {
            reason: format!("Feature {index} has no geometry"),
        })?;
    let geometry = convert_geometry(geometry, index)?;

    let attributes = feature
        .properties
        .as_ref()
        .map(|props| {
            props
                .iter()
                .map(|(key, value)| (key.clone(), AttributeValue::from_json(value)))
                .collect()
        })
        .unwrap_or_default();

    Ok((geometry, attributes))
}

fn convert_geometry(geometry: &geojson::Geometry, index: usize) -> Result<geo::Geometry<f64>> {
    geo::Geometry::<f64>::try_from(geometry.value.clone()).map_err(|e| {
        GeoAuditError::FileRead {
            reason: format!("Feature {index} has an unconvertible geometry: {e}"),
        }
    })
}

/// Serialize a feature collection back into a GeoJSON document.
///
/// Feature ids become GeoJSON feature ids and the CRS, when present, is
/// written as a named foreign `crs` member.
pub fn collection_to_geojson(collection: &FeatureCollection) -> geojson::GeoJson {
    let features = collection
        .iter()
        .map(|feature| {
            let properties: serde_json::Map<String, serde_json::Value> = feature
                .attributes
                .iter()
                .map(|(key, value)| {
                    (
                        key.clone(),
                        serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
                    )
                })
                .collect();

            geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(
                    &feature.geometry,
                ))),
                id: Some(geojson::feature::Id::Number(feature.id.into())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let foreign_members = collection.crs.as_ref().map(|crs| {
        let mut members = serde_json::Map::new();
        members.insert(
            "crs".to_string(),
            serde_json::json!({
                "type": "name",
                "properties": { "name": format!("EPSG:{}", crs.epsg) }
            }),
        );
        members
    });

    geojson::GeoJson::FeatureCollection(geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members,
    })
}

/// Extract a CRS descriptor from a GeoJSON foreign `crs` member.
///
/// Accepts `EPSG:4326`, `urn:ogc:def:crs:EPSG::4326`, and the GeoJSON
/// default `urn:ogc:def:crs:OGC:1.3:CRS84` (treated as WGS 84).
fn extract_crs(crs_value: &serde_json::Value) -> Option<Crs> {
    let name = crs_value
        .get("properties")
        .and_then(|props| props.get("name"))
        .and_then(|name| name.as_str())?;

    if name.ends_with("CRS84") {
        return Some(Crs::wgs84());
    }

    let epsg: u32 = name.rsplit(':').next().and_then(|code| code.parse().ok())?;

    Some(Crs::new(epsg, name))
}
