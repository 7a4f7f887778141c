//! Birth, marriage and death records
//!
//! Records refer to the people they concern by id; the storage layer performs
//! the join when reports need names.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BirthRecordId, DeathRecordId, MarriageRecordId, PersonId};

/// The three kinds of civil record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Birth,
    Marriage,
    Death,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Birth => write!(f, "Birth"),
            RecordKind::Marriage => write!(f, "Marriage"),
            RecordKind::Death => write!(f, "Death"),
        }
    }
}

/// A registered birth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthRecord {
    pub id: BirthRecordId,

    /// When the record was registered (system-assigned, UTC)
    pub registered_at: DateTime<Utc>,

    pub registrant_id: PersonId,
}

impl BirthRecord {
    pub fn new(registrant_id: PersonId, registered_at: DateTime<Utc>) -> Self {
        Self {
            id: BirthRecordId::new(),
            registered_at,
            registrant_id,
        }
    }

    pub fn person_ids(&self) -> Vec<PersonId> {
        vec![self.registrant_id]
    }
}

/// A registered marriage between two distinct people
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarriageRecord {
    pub id: MarriageRecordId,

    pub registered_at: DateTime<Utc>,

    /// Date of the marriage, stored as UTC midnight
    pub married_on: DateTime<Utc>,

    pub spouse1_id: PersonId,

    pub spouse2_id: PersonId,
}

impl MarriageRecord {
    pub fn new(
        spouse1_id: PersonId,
        spouse2_id: PersonId,
        married_on: DateTime<Utc>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MarriageRecordId::new(),
            registered_at,
            married_on,
            spouse1_id,
            spouse2_id,
        }
    }

    pub fn marriage_day(&self) -> NaiveDate {
        self.married_on.date_naive()
    }

    pub fn person_ids(&self) -> Vec<PersonId> {
        vec![self.spouse1_id, self.spouse2_id]
    }
}

/// A registered death
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathRecord {
    pub id: DeathRecordId,

    pub registered_at: DateTime<Utc>,

    /// Date of death, stored as UTC midnight
    pub died_on: DateTime<Utc>,

    pub deceased_id: PersonId,
}

impl DeathRecord {
    pub fn new(deceased_id: PersonId, died_on: DateTime<Utc>, registered_at: DateTime<Utc>) -> Self {
        Self {
            id: DeathRecordId::new(),
            registered_at,
            died_on,
            deceased_id,
        }
    }

    pub fn death_day(&self) -> NaiveDate {
        self.died_on.date_naive()
    }

    pub fn person_ids(&self) -> Vec<PersonId> {
        vec![self.deceased_id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_marriage_references_both_spouses() {
        let a = PersonId::new();
        let b = PersonId::new();
        let on = Utc.with_ymd_and_hms(2020, 2, 29, 0, 0, 0).unwrap();
        let record = MarriageRecord::new(a, b, on, Utc::now());

        assert_eq!(record.person_ids(), vec![a, b]);
        assert_eq!(record.marriage_day(), NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
    }

    #[test]
    fn test_record_kind_serialization() {
        assert_eq!(serde_json::to_string(&RecordKind::Death).unwrap(), "\"death\"");
        assert_eq!(RecordKind::Birth.to_string(), "Birth");
    }

    #[test]
    fn test_death_record_serialization() {
        let on = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let record = DeathRecord::new(PersonId::new(), on, Utc::now());
        let json = serde_json::to_string(&record).unwrap();
        let back: DeathRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
        assert_eq!(back.death_day(), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    }
}
