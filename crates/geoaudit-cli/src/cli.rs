use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GeoAudit - geometry validation and anomaly detection for feature collections
#[derive(Parser, Debug)]
#[command(name = "geoaudit")]
#[command(about = "Validate geographic datasets and score them for anomalies", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a TOML file overriding the analysis thresholds
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the validation pipeline over a GeoJSON file
    Validate(ValidateArgs),

    /// Run the anomaly analysis over a GeoJSON file
    Analyze(AnalyzeArgs),
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the GeoJSON file
    pub path: PathBuf,

    /// Write the repaired collection (when repair happened) to this path
    #[arg(long)]
    pub repaired_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Path to the GeoJSON file
    pub path: PathBuf,
}
