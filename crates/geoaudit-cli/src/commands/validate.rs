use crate::cli::ValidateArgs;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use geoaudit_analysis::{GeoEngine, Validator};
use geoaudit_core::formats::geojson::collection_to_geojson;
use geoaudit_core::models::{Severity, ValidationReport};
use std::fs;
use std::sync::Arc;

pub async fn execute(args: ValidateArgs, output: &OutputWriter) -> Result<()> {
    // A file that cannot be read is still a report, not a crash
    let report = match super::read_collection(&args.path).await {
        Ok(collection) => Validator::new(Arc::new(GeoEngine)).validate(&collection),
        Err(error) => ValidationReport::read_failure(error),
    };

    if let (Some(out_path), Some(repaired)) = (&args.repaired_out, &report.repaired_collection) {
        let document = collection_to_geojson(repaired).to_string();
        fs::write(out_path, document)
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        output.info(format!("Repaired collection written to {}", out_path.display()));
    }

    if output.is_json() {
        output.data(&report)?;
        return Ok(());
    }

    output.section("Validation Report");
    output.kv("File", args.path.display());
    output.kv("Features", report.feature_count);
    output.kv("Valid", report.file_valid);

    if report.file_valid {
        output.success("No issues found");
        return Ok(());
    }

    output.section(format!("Issues ({})", report.issues.len()));
    for issue in &report.issues {
        let location = match issue.feature_id {
            Some(id) => format!("feature {id}"),
            None => "dataset".to_string(),
        };
        let line = format!("[{location}] {:?}: {}", issue.kind, issue.message);
        match issue.severity {
            Severity::Critical | Severity::High => output.error(line),
            Severity::Medium | Severity::Low => output.warning(line),
        }
        if let Some(suggestion) = &issue.repair_suggestion {
            output.info(format!("  suggested repair: {suggestion}"));
        }
    }

    match &report.repaired_collection {
        Some(repaired) => {
            output.success(format!("Automatic repair produced {} features", repaired.len()));
        }
        None => output.warning("Automatic repair was not possible"),
    }

    Ok(())
}
