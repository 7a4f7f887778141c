//! Record composer
//!
//! Turns validated form input into registrations ready for storage. Dates are
//! stored as UTC midnight of the calendar date the user picked, masked CPFs
//! are reduced to digits, and the registration timestamp is taken here.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::cpf;
use super::validation::{self, ValidationReport};
use crate::models::{
    BirthForm, BirthRecord, BirthRegistration, DeathForm, DeathRecord, DeathRegistration,
    FormDate, MarriageForm, MarriageRecord, MarriageRegistration, Person, PersonForm,
};

/// The result of submitting one form.
///
/// The report is always present so a front end can show every field's state;
/// the registration is only built when the report is valid.
#[derive(Debug, Clone)]
pub struct Submission<T> {
    pub report: ValidationReport,
    pub registration: Option<T>,
}

impl<T> Submission<T> {
    pub fn is_valid(&self) -> bool {
        self.registration.is_some()
    }

    fn rejected(report: ValidationReport) -> Self {
        Self {
            report,
            registration: None,
        }
    }
}

/// UTC midnight of a calendar date
pub fn to_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// An optional date: the unset sentinel becomes `None`
fn optional_utc(date: FormDate) -> Option<DateTime<Utc>> {
    date.get().map(to_utc)
}

/// Blank text becomes `None`
fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Blank CPF becomes `None`; anything else is unmasked
fn optional_cpf(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(cpf::normalize(value))
    }
}

/// Build a new person from a validated form. Each call yields a fresh id.
pub fn compose_person(form: &PersonForm) -> Person {
    Person {
        father_name: optional_text(&form.father_name),
        mother_name: optional_text(&form.mother_name),
        father_birth_date: optional_utc(form.father_birth_date),
        mother_birth_date: optional_utc(form.mother_birth_date),
        father_cpf: optional_cpf(&form.father_cpf),
        mother_cpf: optional_cpf(&form.mother_cpf),
        ..Person::new(form.name.trim(), to_utc(form.birth_date.date()))
    }
}

/// Validate and, if valid, compose a birth registration
pub fn compose_birth(form: &BirthForm) -> Submission<BirthRegistration> {
    let report = validation::validate_birth(form);
    if !report.is_valid() {
        return Submission::rejected(report);
    }

    let registrant = compose_person(&form.registrant);
    let record = BirthRecord::new(registrant.id, Utc::now());

    Submission {
        report,
        registration: Some(BirthRegistration { record, registrant }),
    }
}

/// Validate and, if valid, compose a marriage registration.
///
/// The spouses are always two separate people, even with identical content.
pub fn compose_marriage(form: &MarriageForm) -> Submission<MarriageRegistration> {
    let report = validation::validate_marriage(form);
    if !report.is_valid() {
        return Submission::rejected(report);
    }

    let spouse1 = compose_person(&form.spouse1);
    let spouse2 = compose_person(&form.spouse2);
    let record = MarriageRecord::new(
        spouse1.id,
        spouse2.id,
        to_utc(form.married_on.date()),
        Utc::now(),
    );

    Submission {
        report,
        registration: Some(MarriageRegistration {
            record,
            spouse1,
            spouse2,
        }),
    }
}

/// Validate and, if valid, compose a death registration
pub fn compose_death(form: &DeathForm) -> Submission<DeathRegistration> {
    let report = validation::validate_death(form);
    if !report.is_valid() {
        return Submission::rejected(report);
    }

    let deceased = compose_person(&form.deceased);
    let record = DeathRecord::new(deceased.id, to_utc(form.died_on.date()), Utc::now());

    Submission {
        report,
        registration: Some(DeathRegistration { record, deceased }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> FormDate {
        FormDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_minimal_birth() {
        let before = Utc::now();
        let submission = compose_birth(&BirthForm {
            registrant: PersonForm::named("Maria Silva", date(1990, 5, 10)),
        });
        let after = Utc::now();

        assert!(submission.report.is_valid());
        let registration = submission.registration.unwrap();
        let person = &registration.registrant;

        assert_eq!(person.name, "Maria Silva");
        assert_eq!(person.father_birth_date, None);
        assert_eq!(person.mother_birth_date, None);
        assert_eq!(person.father_cpf, None);
        assert_eq!(person.mother_cpf, None);
        assert_eq!(person.father_name, None);
        assert_eq!(registration.record.registrant_id, person.id);

        let registered_at = registration.record.registered_at;
        assert!(registered_at >= before && registered_at <= after);
    }

    #[test]
    fn test_dates_round_trip_without_drift() {
        let mut form = PersonForm::named("João", date(1990, 5, 10));
        form.father_birth_date = date(1960, 12, 31);
        form.mother_birth_date = date(1962, 1, 1);
        let person = compose_person(&form);

        assert_eq!(person.birth_date.date_naive(), date(1990, 5, 10).date());
        assert_eq!(person.birth_date.hour(), 0);
        assert_eq!(
            person.father_birth_date.map(|d| d.date_naive()),
            date(1960, 12, 31).get()
        );
        assert_eq!(
            person.mother_birth_date.map(|d| d.date_naive()),
            date(1962, 1, 1).get()
        );

        // Survives serialization as well
        let json = serde_json::to_string(&person).unwrap();
        let back: Person = serde_json::from_str(&json).unwrap();
        assert_eq!(back.birth_date.date_naive(), date(1990, 5, 10).date());
    }

    #[test]
    fn test_cpfs_unmasked_and_blank_absent() {
        let mut form = PersonForm::named("João", date(1990, 5, 10));
        form.father_cpf = "529.982.247-25".into();
        form.mother_cpf = "   ".into();
        form.father_name = "  José  ".into();
        let person = compose_person(&form);

        assert_eq!(person.father_cpf.as_deref(), Some("52998224725"));
        assert_eq!(person.mother_cpf, None);
        assert_eq!(person.father_name.as_deref(), Some("José"));
        assert_eq!(person.mother_name, None);
    }

    #[test]
    fn test_invalid_form_builds_nothing() {
        let submission = compose_birth(&BirthForm::default());
        assert!(!submission.is_valid());
        assert!(submission.registration.is_none());
        assert_eq!(submission.report.failures().count(), 2);
    }

    #[test]
    fn test_marriage_spouses_are_distinct() {
        let spouse = PersonForm::named("Alex Souza", date(1985, 7, 20));
        let submission = compose_marriage(&MarriageForm {
            married_on: date(2015, 9, 12),
            spouse1: spouse.clone(),
            spouse2: spouse,
        });

        let registration = submission.registration.unwrap();
        assert_ne!(registration.spouse1.id, registration.spouse2.id);
        assert_eq!(registration.spouse1.name, registration.spouse2.name);
        assert_eq!(registration.record.spouse1_id, registration.spouse1.id);
        assert_eq!(registration.record.spouse2_id, registration.spouse2.id);
        assert_eq!(registration.record.marriage_day(), date(2015, 9, 12).date());
    }

    #[test]
    fn test_death_composition() {
        let submission = compose_death(&DeathForm {
            died_on: date(2024, 2, 29),
            deceased: PersonForm::named("Antônio", date(1940, 4, 4)),
        });
        let registration = submission.registration.unwrap();
        assert_eq!(registration.record.deceased_id, registration.deceased.id);
        assert_eq!(registration.record.death_day(), date(2024, 2, 29).date());
    }

    #[test]
    fn test_submission_map_keeps_report() {
        let submission = compose_birth(&BirthForm {
            registrant: PersonForm::named("Maria", date(1990, 5, 10)),
        });
        let mapped = submission.map(|r| r.registrant.name);
        assert!(mapped.report.is_valid());
        assert_eq!(mapped.registration.as_deref(), Some("Maria"));
    }
}
