//! YAML Export functionality

use std::io::Write;

use crate::error::{RegistryError, RegistryResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

fn export_error(e: impl std::fmt::Display) -> RegistryError {
    RegistryError::Export(e.to_string())
}

/// Export the full registry to YAML, with a comment header
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> RegistryResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# Registro Civil full export").map_err(export_error)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_error)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_error)?;
    writeln!(writer, "#").map_err(export_error)?;
    writeln!(writer, "# Contains personal data (names, birth dates, CPFs).").map_err(export_error)?;
    writeln!(writer).map_err(export_error)?;

    serde_yaml::to_writer(writer, &export).map_err(export_error)?;

    Ok(())
}
