//! Command implementations

mod analyze;
mod validate;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;
use geoaudit_core::formats::{self, FormatReader as _};
use geoaudit_core::models::FeatureCollection;
use std::path::Path;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match cli.command {
        Commands::Validate(args) => validate::execute(args, &output).await,
        Commands::Analyze(args) => analyze::execute(args, &output, cli.config.as_deref()).await,
    }
}

/// Resolve the reader from the file extension and load the collection.
/// Both failure modes come back as the same `FileRead` error the commands
/// turn into a report.
async fn read_collection(path: &Path) -> geoaudit_core::Result<FeatureCollection> {
    formats::reader_for(path)?.read(path).await
}
