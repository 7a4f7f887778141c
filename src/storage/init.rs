//! Storage initialization
//!
//! First-run setup: directories, default settings and an empty registry file.

use crate::config::paths::RegistryPaths;
use crate::config::settings::Settings;
use crate::error::RegistryError;

use super::file_io::write_json_atomic;
use super::registry::RegistryData;

/// Initialize storage for a fresh installation. Existing files are kept.
pub fn initialize_storage(paths: &RegistryPaths) -> Result<(), RegistryError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    if !paths.registry_file().exists() {
        write_json_atomic(paths.registry_file(), &RegistryData::default())?;
    }

    tracing::info!(base_dir = %paths.base_dir().display(), "storage initialized");
    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &RegistryPaths) -> bool {
    !paths.settings_file().exists() || !paths.registry_file().exists()
}
