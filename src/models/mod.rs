//! Core data models for the civil registry
//!
//! People, the three record kinds that reference them, the raw form input the
//! registration pipeline validates, and the composed registrations it saves.

pub mod form;
pub mod ids;
pub mod person;
pub mod record;
pub mod registration;

pub use form::{BirthForm, DeathForm, FormDate, MarriageForm, PersonForm};
pub use ids::{BirthRecordId, DeathRecordId, MarriageRecordId, PersonId};
pub use person::{Person, PersonValidationError, MAX_NAME_LEN};
pub use record::{BirthRecord, DeathRecord, MarriageRecord, RecordKind};
pub use registration::{
    BirthRegistration, DeathRegistration, MarriageRegistration, Registration,
};
