//! Custom error types for the civil registry
//!
//! Validation problems in submitted forms are NOT errors: they are reported
//! as [`crate::services::validation::ValidationReport`] values so every field
//! can be shown at once. This enum covers everything that aborts an operation.

use thiserror::Error;

/// The main error type for registry operations
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed input that never reached the field rules (bad date syntax, bad id)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A person still referenced by a record cannot be deleted
    #[error("Person {person} is still referenced by {referenced_by}")]
    PersonReferenced {
        person: String,
        referenced_by: String,
    },

    /// The persistence collaborator rejected a save
    #[error("Failed to save record: {0}")]
    Persistence(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl RegistryError {
    /// Create a "not found" error for people
    pub fn person_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Person",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for birth records
    pub fn birth_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Birth record",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for marriage records
    pub fn marriage_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Marriage record",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for death records
    pub fn death_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Death record",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came from the persistence layer
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Persistence(_) | Self::Storage(_) | Self::PersonReferenced { .. }
        )
    }
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RegistryError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = RegistryError::person_not_found("pes-1234abcd");
        assert_eq!(err.to_string(), "Person not found: pes-1234abcd");
        assert!(err.is_not_found());
        assert!(!err.is_persistence());
    }

    #[test]
    fn test_person_referenced_error() {
        let err = RegistryError::PersonReferenced {
            person: "pes-1234abcd".into(),
            referenced_by: "nas-99999999".into(),
        };
        assert_eq!(
            err.to_string(),
            "Person pes-1234abcd is still referenced by nas-99999999"
        );
        assert!(err.is_persistence());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RegistryError = io_err.into();
        assert!(matches!(err, RegistryError::Io(_)));
    }
}
