//! Person model
//!
//! Any individual appearing in a record: a registrant, a spouse, or the
//! deceased, together with optional parent information.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PersonId;
use crate::services::cpf;

/// Maximum length, in characters, of any stored name
pub const MAX_NAME_LEN: usize = 100;

/// A person as persisted in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,

    pub name: String,

    /// Birth date, stored as UTC midnight of the calendar date
    pub birth_date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_birth_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_birth_date: Option<DateTime<Utc>>,

    /// Father's CPF, digits only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_cpf: Option<String>,

    /// Mother's CPF, digits only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_cpf: Option<String>,
}

impl Person {
    /// Create a person with no parent information
    pub fn new(name: impl Into<String>, birth_date: DateTime<Utc>) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            birth_date,
            father_name: None,
            mother_name: None,
            father_birth_date: None,
            mother_birth_date: None,
            father_cpf: None,
            mother_cpf: None,
        }
    }

    /// The calendar date of birth
    pub fn birth_day(&self) -> NaiveDate {
        self.birth_date.date_naive()
    }

    /// Check the stored-shape invariants.
    ///
    /// The form rules catch all of these before composition; this is what the
    /// persistence layer re-checks before committing.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if self.name.trim().is_empty() {
            return Err(PersonValidationError::EmptyName);
        }

        for name in [Some(&self.name), self.father_name.as_ref(), self.mother_name.as_ref()]
            .into_iter()
            .flatten()
        {
            let len = name.chars().count();
            if len > MAX_NAME_LEN {
                return Err(PersonValidationError::NameTooLong(len));
            }
        }

        for parent_date in [self.father_birth_date, self.mother_birth_date]
            .into_iter()
            .flatten()
        {
            if parent_date >= self.birth_date {
                return Err(PersonValidationError::ParentNotOlder);
            }
        }

        for value in [self.father_cpf.as_deref(), self.mother_cpf.as_deref()]
            .into_iter()
            .flatten()
        {
            if !cpf::is_valid(value) {
                return Err(PersonValidationError::InvalidCpf(value.to_string()));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.birth_day())
    }
}

/// Validation errors for stored people
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    EmptyName,
    NameTooLong(usize),
    ParentNotOlder,
    InvalidCpf(String),
}

impl fmt::Display for PersonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Person name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::ParentNotOlder => {
                write!(f, "Parent birth date must be earlier than the person's")
            }
            Self::InvalidCpf(value) => write!(f, "Invalid CPF: {}", value),
        }
    }
}

impl std::error::Error for PersonValidationError {}
