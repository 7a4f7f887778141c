//! Registry repository for JSON storage
//!
//! People and all three record kinds live in one file, `registry.json`, so a
//! registration (a record plus the people it owns) is committed with a single
//! atomic write. Foreign keys are checked here, and people still referenced
//! by a record cannot be deleted.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};
use crate::models::{
    BirthRecord, BirthRecordId, DeathRecord, DeathRecordId, MarriageRecord, MarriageRecordId,
    Person, PersonId, Registration,
};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of `registry.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryData {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub births: Vec<BirthRecord>,
    #[serde(default)]
    pub marriages: Vec<MarriageRecord>,
    #[serde(default)]
    pub deaths: Vec<DeathRecord>,
}

/// In-memory tables, keyed by id
#[derive(Debug, Clone, Default)]
struct Tables {
    people: HashMap<PersonId, Person>,
    births: HashMap<BirthRecordId, BirthRecord>,
    marriages: HashMap<MarriageRecordId, MarriageRecord>,
    deaths: HashMap<DeathRecordId, DeathRecord>,
}

impl Tables {
    fn from_data(data: RegistryData) -> Self {
        Self {
            people: data.people.into_iter().map(|p| (p.id, p)).collect(),
            births: data.births.into_iter().map(|r| (r.id, r)).collect(),
            marriages: data.marriages.into_iter().map(|r| (r.id, r)).collect(),
            deaths: data.deaths.into_iter().map(|r| (r.id, r)).collect(),
        }
    }

    /// Sorted for stable diffs of the data file
    fn to_data(&self) -> RegistryData {
        let mut people: Vec<_> = self.people.values().cloned().collect();
        people.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let mut births: Vec<_> = self.births.values().cloned().collect();
        births.sort_by_key(|r| (r.registered_at, r.id));

        let mut marriages: Vec<_> = self.marriages.values().cloned().collect();
        marriages.sort_by_key(|r| (r.registered_at, r.id));

        let mut deaths: Vec<_> = self.deaths.values().cloned().collect();
        deaths.sort_by_key(|r| (r.registered_at, r.id));

        RegistryData {
            people,
            births,
            marriages,
            deaths,
        }
    }

    fn insert_person(&mut self, person: &Person) -> RegistryResult<()> {
        person.validate().map_err(|e| {
            RegistryError::Persistence(format!("Person {} rejected: {}", person.id, e))
        })?;
        if self.people.contains_key(&person.id) {
            return Err(RegistryError::Persistence(format!(
                "Person {} already exists",
                person.id
            )));
        }
        self.people.insert(person.id, person.clone());
        Ok(())
    }

    fn require_person(&self, id: PersonId) -> RegistryResult<()> {
        if self.people.contains_key(&id) {
            Ok(())
        } else {
            Err(RegistryError::Persistence(format!(
                "Record references unknown person {}",
                id
            )))
        }
    }

    /// Stage a whole registration; any error leaves the caller to drop `self`
    fn apply(&mut self, registration: &Registration) -> RegistryResult<()> {
        for person in registration.people() {
            self.insert_person(person)?;
        }

        match registration {
            Registration::Birth(r) => {
                self.require_person(r.record.registrant_id)?;
                if self.births.contains_key(&r.record.id) {
                    return Err(duplicate_record(r.record.id));
                }
                self.births.insert(r.record.id, r.record.clone());
            }
            Registration::Marriage(r) => {
                self.require_person(r.record.spouse1_id)?;
                self.require_person(r.record.spouse2_id)?;
                if r.record.spouse1_id == r.record.spouse2_id {
                    return Err(RegistryError::Persistence(
                        "Marriage spouses must be two distinct people".into(),
                    ));
                }
                if self.marriages.contains_key(&r.record.id) {
                    return Err(duplicate_record(r.record.id));
                }
                self.marriages.insert(r.record.id, r.record.clone());
            }
            Registration::Death(r) => {
                self.require_person(r.record.deceased_id)?;
                if self.deaths.contains_key(&r.record.id) {
                    return Err(duplicate_record(r.record.id));
                }
                self.deaths.insert(r.record.id, r.record.clone());
            }
        }

        Ok(())
    }

    /// Display ids of every record that references a person
    fn references_to(&self, id: PersonId) -> Vec<String> {
        let births = self
            .births
            .values()
            .filter(|r| r.registrant_id == id)
            .map(|r| r.id.to_string());
        let marriages = self
            .marriages
            .values()
            .filter(|r| r.spouse1_id == id || r.spouse2_id == id)
            .map(|r| r.id.to_string());
        let deaths = self
            .deaths
            .values()
            .filter(|r| r.deceased_id == id)
            .map(|r| r.id.to_string());

        births.chain(marriages).chain(deaths).collect()
    }
}

fn duplicate_record(id: impl std::fmt::Display) -> RegistryError {
    RegistryError::Persistence(format!("Record {} already exists", id))
}

fn lock_poisoned(e: impl std::fmt::Display) -> RegistryError {
    RegistryError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Find exactly one entry whose id matches a user-typed identifier
fn find_unique<'a, T, I>(
    mut candidates: I,
    identifier: &str,
    entity_type: &'static str,
) -> RegistryResult<Option<T>>
where
    T: Clone + 'a,
    I: Iterator<Item = &'a T>,
{
    let first = match candidates.next() {
        Some(first) => first.clone(),
        None => return Ok(None),
    };
    if candidates.next().is_some() {
        return Err(RegistryError::Validation(format!(
            "{} id '{}' is ambiguous; use more characters",
            entity_type, identifier
        )));
    }
    Ok(Some(first))
}

/// Repository over `registry.json`
pub struct RegistryRepository {
    path: PathBuf,
    tables: RwLock<Tables>,
}

impl RegistryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Load everything from disk, replacing in-memory state
    pub fn load(&self) -> RegistryResult<()> {
        let data: RegistryData = read_json(&self.path)?;
        let mut tables = self.tables.write().map_err(lock_poisoned)?;
        *tables = Tables::from_data(data);
        tracing::debug!(
            people = tables.people.len(),
            births = tables.births.len(),
            marriages = tables.marriages.len(),
            deaths = tables.deaths.len(),
            "registry loaded"
        );
        Ok(())
    }

    /// Apply `change` to a copy of the tables, persist the copy, then swap it in.
    /// Nothing changes in memory or on disk unless every step succeeds.
    fn commit<F>(&self, change: F) -> RegistryResult<()>
    where
        F: FnOnce(&mut Tables) -> RegistryResult<()>,
    {
        let mut tables = self.tables.write().map_err(lock_poisoned)?;
        let mut staged = tables.clone();
        change(&mut staged)?;
        write_json_atomic(&self.path, &staged.to_data()).map_err(|e| match e {
            RegistryError::Storage(cause) => RegistryError::Persistence(cause),
            other => other,
        })?;
        *tables = staged;
        Ok(())
    }

    /// Save a registration and the people it owns as one unit
    pub fn save_registration(&self, registration: &Registration) -> RegistryResult<()> {
        let result = self.commit(|staged| staged.apply(registration));
        match &result {
            Ok(()) => tracing::info!(
                kind = %registration.kind(),
                record = %registration.record_id(),
                "registration saved"
            ),
            Err(e) => tracing::warn!(
                kind = %registration.kind(),
                error = %e,
                "registration rejected by storage"
            ),
        }
        result
    }

    // --- people ---

    pub fn get_person(&self, id: PersonId) -> RegistryResult<Option<Person>> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        Ok(tables.people.get(&id).cloned())
    }

    /// Find a person by full or short id
    pub fn find_person(&self, identifier: &str) -> RegistryResult<Option<Person>> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        find_unique(
            tables.people.values().filter(|p| p.id.matches(identifier)),
            identifier,
            "Person",
        )
    }

    /// All people, sorted by name
    pub fn all_people(&self) -> RegistryResult<Vec<Person>> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        Ok(tables.to_data().people)
    }

    /// Records that reference a person, as display ids
    pub fn references_to(&self, id: PersonId) -> RegistryResult<Vec<String>> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        Ok(tables.references_to(id))
    }

    /// Delete a person no record refers to
    pub fn delete_person(&self, id: PersonId) -> RegistryResult<Person> {
        let mut removed = None;
        self.commit(|staged| {
            let references = staged.references_to(id);
            if !references.is_empty() {
                return Err(RegistryError::PersonReferenced {
                    person: id.to_string(),
                    referenced_by: references.join(", "),
                });
            }
            removed = staged.people.remove(&id);
            match removed {
                Some(_) => Ok(()),
                None => Err(RegistryError::person_not_found(id.to_string())),
            }
        })?;
        removed.ok_or_else(|| RegistryError::person_not_found(id.to_string()))
    }

    // --- births ---

    pub fn all_births(&self) -> RegistryResult<Vec<BirthRecord>> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        Ok(tables.to_data().births)
    }

    pub fn find_birth(&self, identifier: &str) -> RegistryResult<Option<BirthRecord>> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        find_unique(
            tables.births.values().filter(|r| r.id.matches(identifier)),
            identifier,
            "Birth record",
        )
    }

    /// Births registered in `[start, end]`, oldest first
    pub fn births_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RegistryResult<Vec<BirthRecord>> {
        Ok(self
            .all_births()?
            .into_iter()
            .filter(|r| r.registered_at >= start && r.registered_at <= end)
            .collect())
    }

    pub fn delete_birth(&self, id: BirthRecordId) -> RegistryResult<BirthRecord> {
        let mut removed = None;
        self.commit(|staged| {
            removed = staged.births.remove(&id);
            match removed {
                Some(_) => Ok(()),
                None => Err(RegistryError::birth_not_found(id.to_string())),
            }
        })?;
        removed.ok_or_else(|| RegistryError::birth_not_found(id.to_string()))
    }

    // --- marriages ---

    pub fn all_marriages(&self) -> RegistryResult<Vec<MarriageRecord>> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        Ok(tables.to_data().marriages)
    }

    pub fn find_marriage(&self, identifier: &str) -> RegistryResult<Option<MarriageRecord>> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        find_unique(
            tables.marriages.values().filter(|r| r.id.matches(identifier)),
            identifier,
            "Marriage record",
        )
    }

    pub fn marriages_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RegistryResult<Vec<MarriageRecord>> {
        Ok(self
            .all_marriages()?
            .into_iter()
            .filter(|r| r.registered_at >= start && r.registered_at <= end)
            .collect())
    }

    pub fn delete_marriage(&self, id: MarriageRecordId) -> RegistryResult<MarriageRecord> {
        let mut removed = None;
        self.commit(|staged| {
            removed = staged.marriages.remove(&id);
            match removed {
                Some(_) => Ok(()),
                None => Err(RegistryError::marriage_not_found(id.to_string())),
            }
        })?;
        removed.ok_or_else(|| RegistryError::marriage_not_found(id.to_string()))
    }

    // --- deaths ---

    pub fn all_deaths(&self) -> RegistryResult<Vec<DeathRecord>> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        Ok(tables.to_data().deaths)
    }

    pub fn find_death(&self, identifier: &str) -> RegistryResult<Option<DeathRecord>> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        find_unique(
            tables.deaths.values().filter(|r| r.id.matches(identifier)),
            identifier,
            "Death record",
        )
    }

    pub fn deaths_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RegistryResult<Vec<DeathRecord>> {
        Ok(self
            .all_deaths()?
            .into_iter()
            .filter(|r| r.registered_at >= start && r.registered_at <= end)
            .collect())
    }

    pub fn delete_death(&self, id: DeathRecordId) -> RegistryResult<DeathRecord> {
        let mut removed = None;
        self.commit(|staged| {
            removed = staged.deaths.remove(&id);
            match removed {
                Some(_) => Ok(()),
                None => Err(RegistryError::death_not_found(id.to_string())),
            }
        })?;
        removed.ok_or_else(|| RegistryError::death_not_found(id.to_string()))
    }

    /// Snapshot of everything, for export
    pub fn snapshot(&self) -> RegistryResult<RegistryData> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        Ok(tables.to_data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BirthRegistration, DeathRegistration, MarriageRegistration};
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, RegistryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = RegistryRepository::new(temp_dir.path().join("registry.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn birth(name: &str, registered_at: DateTime<Utc>) -> Registration {
        let registrant = Person::new(name, utc(1990, 5, 10));
        let record = BirthRecord::new(registrant.id, registered_at);
        Registration::Birth(BirthRegistration { record, registrant })
    }

    fn marriage() -> Registration {
        let spouse1 = Person::new("Ana", utc(1990, 1, 1));
        let spouse2 = Person::new("Bruno", utc(1989, 2, 2));
        let record = MarriageRecord::new(spouse1.id, spouse2.id, utc(2015, 9, 12), Utc::now());
        Registration::Marriage(MarriageRegistration {
            record,
            spouse1,
            spouse2,
        })
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.all_people().unwrap().is_empty());
        assert!(repo.all_births().unwrap().is_empty());
    }

    #[test]
    fn test_save_registration_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.save_registration(&birth("Maria Silva", Utc::now())).unwrap();
        repo.save_registration(&marriage()).unwrap();

        let repo2 = RegistryRepository::new(temp_dir.path().join("registry.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.all_people().unwrap().len(), 3);
        assert_eq!(repo2.all_births().unwrap().len(), 1);
        assert_eq!(repo2.all_marriages().unwrap().len(), 1);

        let record = &repo2.all_births().unwrap()[0];
        let person = repo2.get_person(record.registrant_id).unwrap().unwrap();
        assert_eq!(person.name, "Maria Silva");
    }

    #[test]
    fn test_dangling_reference_writes_nothing() {
        let (temp_dir, repo) = create_test_repo();
        repo.save_registration(&birth("Maria", Utc::now())).unwrap();
        let before = std::fs::read_to_string(temp_dir.path().join("registry.json")).unwrap();

        let registrant = Person::new("Órfão", utc(2000, 1, 1));
        let record = BirthRecord::new(PersonId::new(), Utc::now());
        let bad = Registration::Birth(BirthRegistration { record, registrant });

        let err = repo.save_registration(&bad).unwrap_err();
        assert!(matches!(err, RegistryError::Persistence(_)));

        // Neither the person nor the record landed, in memory or on disk
        assert_eq!(repo.all_people().unwrap().len(), 1);
        let after = std::fs::read_to_string(temp_dir.path().join("registry.json")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_same_spouse_twice_rejected() {
        let (_temp_dir, repo) = create_test_repo();
        let spouse = Person::new("Ana", utc(1990, 1, 1));
        let mut other = spouse.clone();
        other.id = PersonId::new();
        let record = MarriageRecord::new(spouse.id, spouse.id, utc(2015, 1, 1), Utc::now());
        let bad = Registration::Marriage(MarriageRegistration {
            record,
            spouse1: spouse,
            spouse2: other,
        });

        assert!(repo.save_registration(&bad).is_err());
        assert!(repo.all_people().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_person_rejected() {
        let (_temp_dir, repo) = create_test_repo();
        let mut deceased = Person::new("José", utc(1950, 1, 1));
        deceased.father_cpf = Some("12345678900".into());
        let record = DeathRecord::new(deceased.id, utc(2020, 1, 1), Utc::now());
        let bad = Registration::Death(DeathRegistration { record, deceased });

        let err = repo.save_registration(&bad).unwrap_err();
        assert!(err.to_string().contains("Invalid CPF"));
    }

    #[test]
    fn test_write_failure_is_persistence_error() {
        let temp_dir = TempDir::new().unwrap();
        // The data file's path is a directory, so the rename fails
        let path = temp_dir.path().join("registry.json");
        std::fs::create_dir(&path).unwrap();
        let repo = RegistryRepository::new(path);

        let err = repo.save_registration(&birth("Maria", Utc::now())).unwrap_err();
        assert!(matches!(err, RegistryError::Persistence(_)));
        assert!(repo.all_people().unwrap().is_empty());
    }

    #[test]
    fn test_referenced_person_cannot_be_deleted() {
        let (_temp_dir, repo) = create_test_repo();
        let registration = birth("Maria", Utc::now());
        repo.save_registration(&registration).unwrap();
        let Registration::Birth(b) = registration else {
            unreachable!()
        };

        let err = repo.delete_person(b.registrant.id).unwrap_err();
        assert!(matches!(err, RegistryError::PersonReferenced { .. }));
        assert!(repo.get_person(b.registrant.id).unwrap().is_some());

        repo.delete_birth(b.record.id).unwrap();
        let deleted = repo.delete_person(b.registrant.id).unwrap();
        assert_eq!(deleted.name, "Maria");
        assert!(repo.all_people().unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_person() {
        let (_temp_dir, repo) = create_test_repo();
        let err = repo.delete_person(PersonId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_births_between_is_inclusive() {
        let (_temp_dir, repo) = create_test_repo();
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 3, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 2, 2, 59, 59).unwrap();

        repo.save_registration(&birth("Before", start - Duration::seconds(1))).unwrap();
        repo.save_registration(&birth("AtStart", start)).unwrap();
        repo.save_registration(&birth("AtEnd", end)).unwrap();
        repo.save_registration(&birth("After", end + Duration::seconds(1))).unwrap();

        let found = repo.births_between(start, end).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].registered_at, start);
        assert_eq!(found[1].registered_at, end);
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, repo) = create_test_repo();
        repo.save_registration(&marriage()).unwrap();
        let record = repo.all_marriages().unwrap().remove(0);

        let found = repo.find_marriage(&record.id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, record.id);
        assert!(repo.find_marriage("cas-zzzzzzzz").unwrap().is_none());
    }

    #[test]
    fn test_references_to() {
        let (_temp_dir, repo) = create_test_repo();
        let registration = marriage();
        repo.save_registration(&registration).unwrap();
        let Registration::Marriage(m) = registration else {
            unreachable!()
        };

        assert_eq!(
            repo.references_to(m.spouse2.id).unwrap(),
            vec![m.record.id.to_string()]
        );
    }
}
