//! CLI commands for data export

use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{RegistryError, RegistryResult};
use crate::export::{json, yaml};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export every person and record to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> RegistryResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => handle_export_all(storage, &output, format, pretty),
        ExportCommands::Info => handle_export_info(storage),
    }
}

/// Create an output file, reporting the path on failure
pub(crate) fn create_output(path: &Path) -> RegistryResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        RegistryError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn handle_export_all(
    storage: &Storage,
    output: &Path,
    format: ExportFormat,
    pretty: bool,
) -> RegistryResult<()> {
    let mut writer = create_output(output)?;

    match format {
        ExportFormat::Json => json::export_full_json(storage, &mut writer, pretty)?,
        ExportFormat::Yaml => yaml::export_full_yaml(storage, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| RegistryError::Export(e.to_string()))?;

    println!("Full registry exported to: {}", output.display());
    Ok(())
}

fn handle_export_info(storage: &Storage) -> RegistryResult<()> {
    let export = json::FullExport::from_storage(storage)?;

    println!("Export Information");
    println!("==================\n");

    println!("Schema Version: {}", export.schema_version);
    println!("App Version:    {}", export.app_version);
    println!();

    println!("Data Summary:");
    println!("  People:     {}", export.metadata.person_count);
    println!("  Births:     {}", export.metadata.birth_count);
    println!("  Marriages:  {}", export.metadata.marriage_count);
    println!("  Deaths:     {}", export.metadata.death_count);

    if let (Some(earliest), Some(latest)) = (
        export.metadata.earliest_registration,
        export.metadata.latest_registration,
    ) {
        println!();
        println!("Registration Range:");
        println!("  Earliest: {}", earliest.format("%Y-%m-%d %H:%M:%S UTC"));
        println!("  Latest:   {}", latest.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    println!("\nExamples:");
    println!("  registro export all registry.json --pretty");
    println!("  registro export all registry.yaml --format yaml");

    Ok(())
}
