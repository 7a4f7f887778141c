//! Display formatting for terminal output
//!
//! Tables and detail views for people, records and validation results.

pub mod person;
pub mod record;

pub use person::{format_person_details, format_person_list};
pub use record::{
    format_birth_details, format_birth_list, format_death_details, format_death_list,
    format_marriage_details, format_marriage_list, format_validation_failures,
};
