//! User settings for the civil registry
//!
//! Manages display preferences and the UTC offset used for report day
//! boundaries.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use super::paths::RegistryPaths;
use crate::error::RegistryError;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Date format preference for display (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Offset from UTC, in minutes, of the office's local time.
    /// Report ranges start and end at local midnight.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Whether create/delete operations are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_utc_offset_minutes() -> i32 {
    -180 // Brasília time
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            date_format: default_date_format(),
            utc_offset_minutes: default_utc_offset_minutes(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// The local offset as a chrono `FixedOffset`
    pub fn utc_offset(&self) -> Result<FixedOffset, RegistryError> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            RegistryError::Config(format!(
                "Invalid utc_offset_minutes: {}",
                self.utc_offset_minutes
            ))
        })
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &RegistryPaths) -> Result<Self, RegistryError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                RegistryError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                RegistryError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &RegistryPaths) -> Result<(), RegistryError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            RegistryError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            RegistryError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
