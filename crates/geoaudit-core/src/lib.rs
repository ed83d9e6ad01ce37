//! GeoAudit Core - Domain models, capability ports, and configuration
//!
//! This crate contains the feature/report data model, the capability port
//! definitions consumed by the analysis pipeline, and the GeoJSON loader.

pub mod config;
pub mod error;
pub mod formats;
pub mod models;
pub mod ports;

pub use error::{GeoAuditError, Result};
