//! Registro Civil - civil registry for births, marriages and deaths
//!
//! Registrations are validated field by field (required fields, CPF check
//! digits, parents born before the registrant), composed into records that
//! reference their people by id, and saved atomically to a JSON data file.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Forms, people, records and composed registrations
//! - `services`: CPF validation, field rules, record composition, lookups
//! - `storage`: JSON file storage and the `RecordStore` seam
//! - `audit`: Append-only audit log
//! - `reports`: Date-ranged birth, marriage and death reports
//! - `export`: Full JSON and YAML exports
//! - `display`, `cli`: Terminal output and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use registro::config::paths::RegistryPaths;
//! use registro::models::{BirthForm, FormDate, PersonForm};
//! use registro::services::RegistrationService;
//! use registro::storage::Storage;
//!
//! let mut storage = Storage::new(RegistryPaths::new()?)?;
//! storage.load_all()?;
//!
//! let form = BirthForm {
//!     registrant: PersonForm::named("Maria Silva", "1990-05-10".parse()?),
//! };
//! let submission = RegistrationService::new(&storage).register_birth(&form)?;
//! assert!(submission.is_valid());
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{RegistryError, RegistryResult};
