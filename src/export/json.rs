//! JSON Export functionality
//!
//! Exports the complete registry to JSON format with schema versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{RegistryError, RegistryResult};
use crate::models::{BirthRecord, DeathRecord, MarriageRecord, Person};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full registry export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub people: Vec<Person>,

    pub births: Vec<BirthRecord>,

    pub marriages: Vec<MarriageRecord>,

    pub deaths: Vec<DeathRecord>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub person_count: usize,
    pub birth_count: usize,
    pub marriage_count: usize,
    pub death_count: usize,

    /// Earliest `registered_at` across all records
    pub earliest_registration: Option<DateTime<Utc>>,

    /// Latest `registered_at` across all records
    pub latest_registration: Option<DateTime<Utc>>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> RegistryResult<Self> {
        let data = storage.registry.snapshot()?;

        let registered: Vec<DateTime<Utc>> = data
            .births
            .iter()
            .map(|r| r.registered_at)
            .chain(data.marriages.iter().map(|r| r.registered_at))
            .chain(data.deaths.iter().map(|r| r.registered_at))
            .collect();

        let metadata = ExportMetadata {
            person_count: data.people.len(),
            birth_count: data.births.len(),
            marriage_count: data.marriages.len(),
            death_count: data.deaths.len(),
            earliest_registration: registered.iter().min().copied(),
            latest_registration: registered.iter().max().copied(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            people: data.people,
            births: data.births,
            marriages: data.marriages,
            deaths: data.deaths,
            metadata,
        })
    }
}

/// Export the full registry to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> RegistryResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| RegistryError::Export(e.to_string()))?;

    Ok(())
}
