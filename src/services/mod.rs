//! Service layer for the civil registry
//!
//! The pure core (CPF check digits, field rules, record composition) plus the
//! services that connect it to storage.

pub mod composer;
pub mod cpf;
pub mod records;
pub mod registration;
pub mod validation;

pub use composer::Submission;
pub use records::RecordService;
pub use registration::RegistrationService;
pub use validation::{FieldCheck, ValidationReport};
