//! Path management for the civil registry
//!
//! Provides XDG-compliant path resolution for configuration, data, and exports.
//!
//! ## Path Resolution Order
//!
//! 1. `REGISTRO_CIVIL_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/registro-civil` or `~/.config/registro-civil`
//! 3. Windows: `%APPDATA%\registro-civil`

use std::path::PathBuf;

use crate::error::RegistryError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "REGISTRO_CIVIL_DATA_DIR";

/// Manages all paths used by the registry
#[derive(Debug, Clone)]
pub struct RegistryPaths {
    base_dir: PathBuf,
}

impl RegistryPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override nor a home directory can be found.
    pub fn new() -> Result<Self, RegistryError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create RegistryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/registro-civil/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the default directory for exported files
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to registry.json (people and all records)
    pub fn registry_file(&self) -> PathBuf {
        self.data_dir().join("registry.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), RegistryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| RegistryError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| RegistryError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir()).map_err(|e| {
            RegistryError::Io(format!("Failed to create export directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if the registry has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, RegistryError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("registro-civil"));
    }
    let home = std::env::var("HOME").map_err(|_| {
        RegistryError::Config("Could not determine HOME directory".into())
    })?;
    Ok(PathBuf::from(home).join(".config").join("registro-civil"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, RegistryError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| RegistryError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("registro-civil"))
}
