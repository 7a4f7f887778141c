//! Raw form input
//!
//! These are the values a front end collects before any validation: free
//! text, masked CPF strings, and dates that may be "unset".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// A date picked in a form.
///
/// Besides a real date it can be "unset" (nothing chosen) or "invalid" (text
/// that is not a date). Both are reported by the field rules rather than
/// rejected while the form is being filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormDate(DateInput);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum DateInput {
    Unset,
    Date(NaiveDate),
    Invalid,
}

impl FormDate {
    /// The "no date chosen" sentinel
    pub const UNSET: FormDate = FormDate(DateInput::Unset);

    /// Input that could not be read as a date
    pub const INVALID: FormDate = FormDate(DateInput::Invalid);

    pub fn new(date: NaiveDate) -> Self {
        Self(DateInput::Date(date))
    }

    pub fn from_ymd_opt(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::new)
    }

    pub fn is_unset(&self) -> bool {
        self.0 == DateInput::Unset
    }

    pub fn is_invalid(&self) -> bool {
        self.0 == DateInput::Invalid
    }

    /// The chosen date, or `NaiveDate::MIN` when there is none
    pub fn date(&self) -> NaiveDate {
        self.get().unwrap_or(NaiveDate::MIN)
    }

    /// The chosen date, or `None` when unset or invalid
    pub fn get(&self) -> Option<NaiveDate> {
        match self.0 {
            DateInput::Date(date) => Some(date),
            DateInput::Unset | DateInput::Invalid => None,
        }
    }

    /// Read a form value: absent or blank is unset, unreadable text is invalid
    pub fn from_input(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::UNSET,
            Some(s) => s.parse().unwrap_or(Self::INVALID),
        }
    }
}

impl Default for FormDate {
    fn default() -> Self {
        Self::UNSET
    }
}

impl From<NaiveDate> for FormDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

impl From<Option<NaiveDate>> for FormDate {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map(Self::new).unwrap_or(Self::UNSET)
    }
}

impl FromStr for FormDate {
    type Err = RegistryError;

    /// Accepts `YYYY-MM-DD` or the Brazilian `DD/MM/YYYY`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
            .map(Self::new)
            .map_err(|_| {
                RegistryError::Validation(format!(
                    "Invalid date '{}'. Use YYYY-MM-DD or DD/MM/YYYY",
                    s
                ))
            })
    }
}

impl fmt::Display for FormDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            DateInput::Unset => write!(f, "(unset)"),
            DateInput::Date(date) => write!(f, "{}", date),
            DateInput::Invalid => write!(f, "(invalid)"),
        }
    }
}

/// Fields describing one person in any form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonForm {
    pub name: String,
    pub birth_date: FormDate,
    pub father_name: String,
    pub mother_name: String,
    pub father_birth_date: FormDate,
    pub mother_birth_date: FormDate,
    /// Possibly masked, e.g. `529.982.247-25`
    pub father_cpf: String,
    pub mother_cpf: String,
}

impl PersonForm {
    /// A form with only the required fields filled in
    pub fn named(name: impl Into<String>, birth_date: FormDate) -> Self {
        Self {
            name: name.into(),
            birth_date,
            ..Self::default()
        }
    }
}

/// Birth registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthForm {
    pub registrant: PersonForm,
}

/// Marriage registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarriageForm {
    pub married_on: FormDate,
    pub spouse1: PersonForm,
    pub spouse2: PersonForm,
}

/// Death registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathForm {
    pub died_on: FormDate,
    pub deceased: PersonForm,
}
