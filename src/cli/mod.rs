//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer.

pub mod birth;
pub mod death;
pub mod export;
pub mod forms;
pub mod marriage;
pub mod person;
pub mod report;

pub use birth::{handle_birth_command, BirthCommands};
pub use death::{handle_death_command, DeathCommands};
pub use export::{handle_export_command, ExportCommands};
pub use marriage::{handle_marriage_command, MarriageCommands};
pub use person::{handle_person_command, PersonCommands};
pub use report::{handle_report_command, ReportCommands};

use crate::display::format_validation_failures;
use crate::error::RegistryError;
use crate::services::ValidationReport;

/// Print every failing field and turn the rejection into an error
pub(crate) fn reject(report: &ValidationReport) -> RegistryError {
    eprint!("{}", format_validation_failures(report));
    RegistryError::Validation(format!(
        "{} field(s) failed validation",
        report.failures().count()
    ))
}
