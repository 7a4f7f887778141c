//! Registration service
//!
//! Runs a submitted form through validation and composition, then hands the
//! built registration to a [`RecordStore`]. An invalid form never reaches the
//! store; a store failure is returned as an error with its cause.

use crate::error::RegistryResult;
use crate::models::{
    BirthForm, BirthRegistration, DeathForm, DeathRegistration, MarriageForm,
    MarriageRegistration, Registration,
};
use crate::storage::RecordStore;

use super::composer::{self, Submission};

/// Service for submitting birth, marriage and death forms
pub struct RegistrationService<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> RegistrationService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Save a composed registration, if there is one
    fn persist<T>(&self, submission: Submission<T>) -> RegistryResult<Submission<T>>
    where
        T: Clone + Into<Registration>,
    {
        match &submission.registration {
            Some(built) => {
                let registration: Registration = built.clone().into();
                self.store.save(&registration)?;
                tracing::debug!(
                    kind = %registration.kind(),
                    record = %registration.record_id(),
                    "submission stored"
                );
            }
            None => {
                tracing::debug!(
                    failures = submission.report.failures().count(),
                    "submission rejected by validation"
                );
            }
        }
        Ok(submission)
    }

    pub fn register_birth(&self, form: &BirthForm) -> RegistryResult<Submission<BirthRegistration>> {
        self.persist(composer::compose_birth(form))
    }

    pub fn register_marriage(
        &self,
        form: &MarriageForm,
    ) -> RegistryResult<Submission<MarriageRegistration>> {
        self.persist(composer::compose_marriage(form))
    }

    pub fn register_death(&self, form: &DeathForm) -> RegistryResult<Submission<DeathRegistration>> {
        self.persist(composer::compose_death(form))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::models::{FormDate, PersonForm};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingStore {
        saved: RefCell<Vec<Registration>>,
    }

    impl RecordStore for RecordingStore {
        fn save(&self, registration: &Registration) -> RegistryResult<()> {
            self.saved.borrow_mut().push(registration.clone());
            Ok(())
        }
    }

    struct FailingStore;

    impl RecordStore for FailingStore {
        fn save(&self, _registration: &Registration) -> RegistryResult<()> {
            Err(RegistryError::Persistence("connection lost".into()))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> FormDate {
        FormDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_invalid_form_not_saved() {
        let store = RecordingStore::default();
        let service = RegistrationService::new(&store);

        let submission = service.register_birth(&BirthForm::default()).unwrap();
        assert!(!submission.is_valid());
        assert_eq!(submission.report.failures().count(), 2);
        assert!(store.saved.borrow().is_empty());
    }

    #[test]
    fn test_valid_form_saved_once() {
        let store = RecordingStore::default();
        let service = RegistrationService::new(&store);

        let submission = service
            .register_birth(&BirthForm {
                registrant: PersonForm::named("Maria Silva", date(1990, 5, 10)),
            })
            .unwrap();

        let saved = store.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(
            saved[0],
            Registration::Birth(submission.registration.unwrap())
        );
    }

    #[test]
    fn test_marriage_saved_with_both_spouses() {
        let store = RecordingStore::default();
        let service = RegistrationService::new(&store);
        let spouse = PersonForm::named("Alex Souza", date(1985, 7, 20));

        service
            .register_marriage(&MarriageForm {
                married_on: date(2015, 9, 12),
                spouse1: spouse.clone(),
                spouse2: spouse,
            })
            .unwrap();

        let saved = store.saved.borrow();
        assert_eq!(saved[0].people().len(), 2);
    }

    #[test]
    fn test_store_failure_surfaces_cause() {
        let service = RegistrationService::new(&FailingStore);

        let err = service
            .register_death(&DeathForm {
                died_on: date(2024, 1, 1),
                deceased: PersonForm::named("Antônio", date(1940, 4, 4)),
            })
            .unwrap_err();

        assert!(err.is_persistence());
        assert!(err.to_string().contains("connection lost"));
    }

    #[test]
    fn test_works_through_trait_object() {
        let store = RecordingStore::default();
        let dyn_store: &dyn RecordStore = &store;
        let service = RegistrationService::new(dyn_store);

        let submission = service
            .register_birth(&BirthForm {
                registrant: PersonForm::named("João", date(2001, 1, 1)),
            })
            .unwrap();
        assert!(submission.is_valid());
        assert_eq!(store.saved.borrow().len(), 1);
    }
}
