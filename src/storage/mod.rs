//! Storage layer for the civil registry
//!
//! Provides JSON file storage with atomic writes, the audit log, and the
//! [`RecordStore`] seam the registration service saves through.

pub mod file_io;
pub mod init;
pub mod registry;

pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use registry::{RegistryData, RegistryRepository};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::RegistryPaths;
use crate::error::RegistryResult;
use crate::models::Registration;

/// Persists composed registrations.
///
/// A save is all-or-nothing: when it returns an error, neither the record nor
/// any of the people it owns have been stored.
pub trait RecordStore {
    fn save(&self, registration: &Registration) -> RegistryResult<()>;
}

/// Main storage coordinator
pub struct Storage {
    paths: RegistryPaths,
    pub registry: RegistryRepository,
    audit: AuditLogger,
    audit_enabled: bool,
}

impl Storage {
    /// Create a new Storage instance; nothing is read until [`Storage::load_all`]
    pub fn new(paths: RegistryPaths) -> RegistryResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            registry: RegistryRepository::new(paths.registry_file()),
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: true,
            paths,
        })
    }

    /// Turn audit logging on or off (from `Settings::audit_enabled`)
    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit_enabled = enabled;
        self
    }

    pub fn paths(&self) -> &RegistryPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> RegistryResult<()> {
        self.registry.load()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record the creation of every entity in a registration
    pub fn log_registration(&self, registration: &Registration) -> RegistryResult<()> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit
            .log_batch(&AuditEntry::for_registration(registration))
    }

    /// Record a deletion
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> RegistryResult<()> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit.log(&AuditEntry::delete(
            entity_type,
            entity_id,
            entity_name,
            entity,
        ))
    }
}

impl RecordStore for Storage {
    /// Save, then audit. The save has already been committed when the audit
    /// write runs, so an audit failure is logged rather than returned.
    fn save(&self, registration: &Registration) -> RegistryResult<()> {
        self.registry.save_registration(registration)?;
        if let Err(e) = self.log_registration(registration) {
            tracing::warn!(error = %e, "failed to write audit entries");
        }
        Ok(())
    }
}
