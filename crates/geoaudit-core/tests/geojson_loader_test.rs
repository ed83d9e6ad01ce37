//! Integration tests for the GeoJSON loader
//!
//! Verifies that:
//! - Feature ids are assigned positionally
//! - A declared CRS is extracted, and absence yields `crs = None`
//! - Properties survive as scalar attributes
//! - Unreadable input surfaces as a FileRead error, never a panic

use geoaudit_core::formats::{geojson::GeoJsonReader, FormatReader};
use geoaudit_core::models::AttributeValue;
use geoaudit_core::GeoAuditError;
use std::fs;
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const TWO_FEATURES: &str = r#"{
    "type": "FeatureCollection",
    "crs": { "type": "name", "properties": { "name": "EPSG:4326" } },
    "features": [
        {
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [10.0, 20.0] },
            "properties": { "name": "alpha", "height": 12.5 }
        },
        {
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
            },
            "properties": {}
        }
    ]
}"#;

#[tokio::test]
async fn test_positional_ids_and_crs() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(&temp_dir, "two.geojson", TWO_FEATURES);

    let collection = GeoJsonReader.read(&path).await.unwrap();

    assert_eq!(collection.len(), 2);
    assert_eq!(collection.features()[0].id, 0);
    assert_eq!(collection.features()[1].id, 1);
    assert_eq!(collection.crs.as_ref().unwrap().epsg, 4326);
}

#[tokio::test]
async fn test_properties_become_attributes() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(&temp_dir, "two.geojson", TWO_FEATURES);

    let collection = GeoJsonReader.read(&path).await.unwrap();
    let attributes = &collection.features()[0].attributes;

    assert_eq!(
        attributes.get("name"),
        Some(&AttributeValue::Text("alpha".to_string()))
    );
    assert_eq!(attributes.get("height"), Some(&AttributeValue::Number(12.5)));
}

#[tokio::test]
async fn test_missing_crs_is_observable() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(
        &temp_dir,
        "no_crs.geojson",
        r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                    "properties": {}
                }
            ]
        }"#,
    );

    let collection = GeoJsonReader.read(&path).await.unwrap();
    assert!(collection.crs.is_none());
}

#[tokio::test]
async fn test_total_bounds_cover_all_features() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(&temp_dir, "two.geojson", TWO_FEATURES);

    let collection = GeoJsonReader.read(&path).await.unwrap();
    let bounds = collection.bounds.unwrap();

    assert_eq!(bounds.min_x, 0.0);
    assert_eq!(bounds.max_x, 10.0);
    assert_eq!(bounds.max_y, 20.0);
}

#[tokio::test]
async fn test_malformed_input_is_a_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(&temp_dir, "broken.geojson", "{ this is not geojson");

    let error = GeoJsonReader.read(&path).await.unwrap_err();
    assert!(matches!(error, GeoAuditError::FileRead { .. }));
}

#[tokio::test]
async fn test_missing_file_is_a_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nowhere.geojson");

    let error = GeoJsonReader.read(&path).await.unwrap_err();
    assert!(matches!(error, GeoAuditError::FileRead { .. }));
}
