//! Format abstraction layer
//!
//! Loaders convert raw bytes on disk into the in-memory feature model.
//! Each format implements the `FormatReader` trait; a read failure surfaces
//! as `GeoAuditError::FileRead`, which the validation boundary turns into a
//! `FileReadError` issue rather than propagating further.

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use crate::error::{GeoAuditError, Result};
use crate::models::FeatureCollection;

pub mod geojson;

/// Format reader trait that all format implementations must implement
#[async_trait]
pub trait FormatReader: Send + Sync + std::fmt::Debug {
    /// Read a feature collection from the given path
    async fn read(&self, path: &Path) -> Result<FeatureCollection>;

    /// Supported file extensions (e.g., ["json", "geojson"])
    fn supported_extensions(&self) -> &[&str];

    /// Human-readable format name
    fn format_name(&self) -> &str;
}

static READERS: [&(dyn FormatReader); 1] = [&geojson::GeoJsonReader];

/// Pick the reader for a path by file extension.
///
/// An unrecognized extension is a `FileRead` error, which callers surface
/// as a `FileReadError` issue like any other unreadable input.
pub fn reader_for(path: &Path) -> Result<&'static dyn FormatReader> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    for reader in READERS {
        if reader.supported_extensions().contains(&extension.as_str()) {
            debug!(format = reader.format_name(), path = %path.display(), "format reader selected");
            return Ok(reader);
        }
    }

    Err(GeoAuditError::FileRead {
        reason: format!("no reader supports the {extension:?} extension"),
    })
}
