//! Composed registrations
//!
//! A registration is one record together with the people it owns. It is the
//! unit handed to the persistence layer and saved atomically.

use serde::{Deserialize, Serialize};

use super::person::Person;
use super::record::{BirthRecord, DeathRecord, MarriageRecord, RecordKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthRegistration {
    pub record: BirthRecord,
    pub registrant: Person,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarriageRegistration {
    pub record: MarriageRecord,
    pub spouse1: Person,
    pub spouse2: Person,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathRegistration {
    pub record: DeathRecord,
    pub deceased: Person,
}

/// Any composed registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Registration {
    Birth(BirthRegistration),
    Marriage(MarriageRegistration),
    Death(DeathRegistration),
}

impl Registration {
    pub fn kind(&self) -> RecordKind {
        match self {
            Registration::Birth(_) => RecordKind::Birth,
            Registration::Marriage(_) => RecordKind::Marriage,
            Registration::Death(_) => RecordKind::Death,
        }
    }

    /// Short display id of the record
    pub fn record_id(&self) -> String {
        match self {
            Registration::Birth(r) => r.record.id.to_string(),
            Registration::Marriage(r) => r.record.id.to_string(),
            Registration::Death(r) => r.record.id.to_string(),
        }
    }

    /// The people owned by this registration
    pub fn people(&self) -> Vec<&Person> {
        match self {
            Registration::Birth(r) => vec![&r.registrant],
            Registration::Marriage(r) => vec![&r.spouse1, &r.spouse2],
            Registration::Death(r) => vec![&r.deceased],
        }
    }

    /// Human-readable name for audit entries
    pub fn describe(&self) -> String {
        match self {
            Registration::Birth(r) => r.registrant.name.clone(),
            Registration::Marriage(r) => format!("{} & {}", r.spouse1.name, r.spouse2.name),
            Registration::Death(r) => r.deceased.name.clone(),
        }
    }
}

impl From<BirthRegistration> for Registration {
    fn from(r: BirthRegistration) -> Self {
        Registration::Birth(r)
    }
}

impl From<MarriageRegistration> for Registration {
    fn from(r: MarriageRegistration) -> Self {
        Registration::Marriage(r)
    }
}

impl From<DeathRegistration> for Registration {
    fn from(r: DeathRegistration) -> Self {
        Registration::Death(r)
    }
}
