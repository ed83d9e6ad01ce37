use crate::cli::AnalyzeArgs;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use geoaudit_analysis::{Analyzer, GeoEngine};
use geoaudit_core::config::AnalysisConfig;
use geoaudit_core::models::{AnalysisReport, AnalysisStatus};
use std::path::Path;
use std::sync::Arc;

pub async fn execute(
    args: AnalyzeArgs,
    output: &OutputWriter,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = AnalysisConfig::load(config_path).context("Invalid analysis configuration")?;

    let report = match super::read_collection(&args.path).await {
        Ok(collection) => Analyzer::new(Arc::new(GeoEngine), config).analyze(&collection),
        Err(error) => AnalysisReport::failed(error),
    };

    if output.is_json() {
        output.data(&report)?;
        return Ok(());
    }

    output.section("Analysis Report");
    output.kv("File", args.path.display());
    output.kv("Status", format!("{:?}", report.status));
    output.kv("Analyzed at", report.analyzed_at.to_rfc3339());
    output.kv("Composite risk score", format!("{:.3}", report.composite_risk_score));

    if let Some(error) = &report.error {
        output.error(error);
        return Ok(());
    }

    output.section("Statistical Signals");
    if report.statistical_signals.is_empty() {
        output.info("No detector produced a signal");
    }
    for signal in &report.statistical_signals {
        if signal.anomaly_feature_ids.is_empty() {
            output.info(format!("{}: no anomalies", signal.detector_name));
        } else {
            output.warning(format!(
                "{}: {} anomalous features {:?}",
                signal.detector_name,
                signal.anomaly_feature_ids.len(),
                signal.anomaly_feature_ids
            ));
        }
    }

    output.section("Geometric Findings");
    if report.geometric_findings.is_empty() {
        output.success("No threshold violations");
    }
    for finding in &report.geometric_findings {
        let rules: Vec<String> = finding.issues.iter().map(|r| format!("{r:?}")).collect();
        output.warning(format!(
            "feature {} ({:?}): {}",
            finding.feature_id,
            finding.geometry_type,
            rules.join(", ")
        ));
    }

    if let Some(segmentation) = &report.segmentation {
        output.section("Segmentation");
        output.kv("Model", &segmentation.model);
        output.info(&segmentation.summary);
    }

    if report.status == AnalysisStatus::Partial {
        output.warning("Some detectors failed; results are partial");
    }

    Ok(())
}
