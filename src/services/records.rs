//! Record and person lookups
//!
//! Joins stored records with their people for display, and performs audited
//! deletions. Deleting a person that a record still refers to is refused by
//! the storage layer.

use serde::Serialize;

use crate::audit::EntityType;
use crate::error::{RegistryError, RegistryResult};
use crate::models::{
    BirthRecord, BirthRegistration, DeathRecord, DeathRegistration, MarriageRecord,
    MarriageRegistration, Person, PersonId,
};
use crate::storage::Storage;

/// Service for reading and deleting stored records
pub struct RecordService<'a> {
    storage: &'a Storage,
}

impl<'a> RecordService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Load a person a record refers to; a miss means the data file is damaged
    fn person(&self, id: PersonId) -> RegistryResult<Person> {
        self.storage
            .registry
            .get_person(id)?
            .ok_or_else(|| RegistryError::Storage(format!("Record refers to missing person {}", id)))
    }

    /// Audit a delete that has already been committed; a failure is only logged
    fn audit_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: String,
        entity: &T,
    ) {
        if let Err(e) = self
            .storage
            .log_delete(entity_type, entity_id, Some(entity_name), entity)
        {
            tracing::warn!(error = %e, %entity_type, "failed to write audit entry for delete");
        }
    }

    pub fn join_birth(&self, record: BirthRecord) -> RegistryResult<BirthRegistration> {
        let registrant = self.person(record.registrant_id)?;
        Ok(BirthRegistration { record, registrant })
    }

    pub fn join_marriage(&self, record: MarriageRecord) -> RegistryResult<MarriageRegistration> {
        let spouse1 = self.person(record.spouse1_id)?;
        let spouse2 = self.person(record.spouse2_id)?;
        Ok(MarriageRegistration {
            record,
            spouse1,
            spouse2,
        })
    }

    pub fn join_death(&self, record: DeathRecord) -> RegistryResult<DeathRegistration> {
        let deceased = self.person(record.deceased_id)?;
        Ok(DeathRegistration { record, deceased })
    }

    // --- births ---

    pub fn list_births(&self) -> RegistryResult<Vec<BirthRegistration>> {
        self.storage
            .registry
            .all_births()?
            .into_iter()
            .map(|r| self.join_birth(r))
            .collect()
    }

    pub fn get_birth(&self, identifier: &str) -> RegistryResult<BirthRegistration> {
        let record = self
            .storage
            .registry
            .find_birth(identifier)?
            .ok_or_else(|| RegistryError::birth_not_found(identifier))?;
        self.join_birth(record)
    }

    /// Delete a birth record; the registrant is kept
    pub fn delete_birth(&self, identifier: &str) -> RegistryResult<BirthRecord> {
        let found = self.get_birth(identifier)?;
        let record = self.storage.registry.delete_birth(found.record.id)?;
        self.audit_delete(
            EntityType::BirthRecord,
            record.id.to_string(),
            found.registrant.name,
            &record,
        );
        Ok(record)
    }

    // --- marriages ---

    pub fn list_marriages(&self) -> RegistryResult<Vec<MarriageRegistration>> {
        self.storage
            .registry
            .all_marriages()?
            .into_iter()
            .map(|r| self.join_marriage(r))
            .collect()
    }

    pub fn get_marriage(&self, identifier: &str) -> RegistryResult<MarriageRegistration> {
        let record = self
            .storage
            .registry
            .find_marriage(identifier)?
            .ok_or_else(|| RegistryError::marriage_not_found(identifier))?;
        self.join_marriage(record)
    }

    pub fn delete_marriage(&self, identifier: &str) -> RegistryResult<MarriageRecord> {
        let found = self.get_marriage(identifier)?;
        let record = self.storage.registry.delete_marriage(found.record.id)?;
        self.audit_delete(
            EntityType::MarriageRecord,
            record.id.to_string(),
            format!("{} & {}", found.spouse1.name, found.spouse2.name),
            &record,
        );
        Ok(record)
    }

    // --- deaths ---

    pub fn list_deaths(&self) -> RegistryResult<Vec<DeathRegistration>> {
        self.storage
            .registry
            .all_deaths()?
            .into_iter()
            .map(|r| self.join_death(r))
            .collect()
    }

    pub fn get_death(&self, identifier: &str) -> RegistryResult<DeathRegistration> {
        let record = self
            .storage
            .registry
            .find_death(identifier)?
            .ok_or_else(|| RegistryError::death_not_found(identifier))?;
        self.join_death(record)
    }

    pub fn delete_death(&self, identifier: &str) -> RegistryResult<DeathRecord> {
        let found = self.get_death(identifier)?;
        let record = self.storage.registry.delete_death(found.record.id)?;
        self.audit_delete(
            EntityType::DeathRecord,
            record.id.to_string(),
            found.deceased.name,
            &record,
        );
        Ok(record)
    }

    // --- people ---

    pub fn list_people(&self) -> RegistryResult<Vec<Person>> {
        self.storage.registry.all_people()
    }

    /// A person and the display ids of the records that refer to them
    pub fn get_person(&self, identifier: &str) -> RegistryResult<(Person, Vec<String>)> {
        let person = self
            .storage
            .registry
            .find_person(identifier)?
            .ok_or_else(|| RegistryError::person_not_found(identifier))?;
        let references = self.storage.registry.references_to(person.id)?;
        Ok((person, references))
    }

    pub fn delete_person(&self, identifier: &str) -> RegistryResult<Person> {
        let (person, _) = self.get_person(identifier)?;
        let deleted = self.storage.registry.delete_person(person.id)?;
        self.audit_delete(
            EntityType::Person,
            deleted.id.to_string(),
            deleted.name.clone(),
            &deleted,
        );
        Ok(deleted)
    }
}
