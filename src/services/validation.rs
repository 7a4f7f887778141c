//! Field validation rules
//!
//! Every rule produces a [`FieldCheck`] and never stops the others from
//! running: a form is checked in full so the user sees every problem at once.
//! User-facing messages are in Portuguese, as printed on the office's forms.

use serde::Serialize;
use std::fmt;

use super::cpf;
use crate::models::{BirthForm, DeathForm, FormDate, MarriageForm, PersonForm, MAX_NAME_LEN};

/// Outcome of one rule applied to one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCheck {
    /// Dotted field path, e.g. `spouse1.father_cpf`
    pub field: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldCheck {
    pub fn pass(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            valid: true,
            message: None,
        }
    }

    pub fn fail(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            valid: false,
            message: Some(message.into()),
        }
    }
}

impl fmt::Display for FieldCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.field, message),
            None => write!(f, "{}: ok", self.field),
        }
    }
}

/// Fails when the trimmed value is empty
pub fn required_text(field: &str, label: &str, value: &str) -> FieldCheck {
    if value.trim().is_empty() {
        FieldCheck::fail(field, format!("{} é obrigatório", label))
    } else {
        FieldCheck::pass(field)
    }
}

/// Fails when the date is unset or was not a readable date. Any real date is
/// accepted.
pub fn required_date(field: &str, label: &str, date: FormDate) -> FieldCheck {
    if date.is_unset() {
        FieldCheck::fail(field, format!("{} é obrigatório", label))
    } else if date.is_invalid() {
        FieldCheck::fail(field, format!("{} inválida", label))
    } else {
        FieldCheck::pass(field)
    }
}

/// Blank passes (CPF fields are optional); otherwise the normalized digits
/// must pass the check-digit algorithm.
pub fn cpf(field: &str, value: &str) -> FieldCheck {
    if value.trim().is_empty() || cpf::is_valid(&cpf::normalize(value)) {
        FieldCheck::pass(field)
    } else {
        FieldCheck::fail(field, "CPF inválido")
    }
}

/// A set parent date must be strictly earlier than the child's date.
/// Skipped when the parent date is unset; a child without a usable date
/// makes any set parent date fail.
pub fn parent_date(field: &str, role: &str, parent: FormDate, child: FormDate) -> FieldCheck {
    if parent.is_invalid() {
        return FieldCheck::fail(field, format!("Data de nascimento do {} inválida", role));
    }
    match (parent.get(), child.get()) {
        (None, _) => FieldCheck::pass(field),
        (Some(parent), Some(child)) if parent < child => FieldCheck::pass(field),
        _ => FieldCheck::fail(
            field,
            format!(
                "Data de nascimento do {} deve ser anterior à data de nascimento do registrado",
                role
            ),
        ),
    }
}

/// Fails when the value is longer than [`MAX_NAME_LEN`] characters
pub fn max_length(field: &str, label: &str, value: &str) -> FieldCheck {
    if value.trim().chars().count() > MAX_NAME_LEN {
        FieldCheck::fail(
            field,
            format!("{} deve ter no máximo {} caracteres", label, MAX_NAME_LEN),
        )
    } else {
        FieldCheck::pass(field)
    }
}

/// Required name: presence first, then length
fn required_name(field: &str, label: &str, value: &str) -> FieldCheck {
    let check = required_text(field, label, value);
    if check.valid {
        max_length(field, label, value)
    } else {
        check
    }
}

/// Every check run over one form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    checks: Vec<FieldCheck>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, check: FieldCheck) {
        self.checks.push(check);
    }

    /// True only when every check passed
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|c| c.valid)
    }

    pub fn checks(&self) -> &[FieldCheck] {
        &self.checks
    }

    pub fn failures(&self) -> impl Iterator<Item = &FieldCheck> {
        self.checks.iter().filter(|c| !c.valid)
    }

    /// The check for a given field, if the form has one
    pub fn check(&self, field: &str) -> Option<&FieldCheck> {
        self.checks.iter().find(|c| c.field == field)
    }

    /// The failure message for a field, if it failed
    pub fn message(&self, field: &str) -> Option<&str> {
        self.check(field).and_then(|c| c.message.as_deref())
    }
}

/// Labels that vary by form for the person-level fields
#[derive(Debug, Clone)]
pub struct PersonLabels {
    pub name: String,
    pub birth_date: String,
    pub father_name: String,
    pub mother_name: String,
    pub father_role: String,
    pub mother_role: String,
}

impl PersonLabels {
    /// Registrant of a birth record
    pub fn registrant() -> Self {
        Self {
            name: "Nome".into(),
            birth_date: "Data de Nascimento".into(),
            father_name: "Nome do Pai".into(),
            mother_name: "Nome da Mãe".into(),
            father_role: "pai".into(),
            mother_role: "mãe".into(),
        }
    }

    /// Spouse 1 or 2 of a marriage record
    pub fn spouse(n: u8) -> Self {
        Self {
            name: format!("Nome do Cônjuge {}", n),
            birth_date: format!("Data de Nascimento do Cônjuge {}", n),
            father_name: format!("Nome do Pai do Cônjuge {}", n),
            mother_name: format!("Nome da Mãe do Cônjuge {}", n),
            father_role: format!("pai do Cônjuge {}", n),
            mother_role: format!("mãe do Cônjuge {}", n),
        }
    }

    /// The deceased of a death record
    pub fn deceased() -> Self {
        Self {
            name: "Nome do Falecido".into(),
            birth_date: "Data de Nascimento do Falecido".into(),
            ..Self::registrant()
        }
    }
}

/// Run every person-level rule, prefixing field paths with `prefix`
pub fn validate_person(
    report: &mut ValidationReport,
    prefix: &str,
    labels: &PersonLabels,
    form: &PersonForm,
) {
    let key = |name: &str| format!("{}.{}", prefix, name);

    report.push(required_name(&key("name"), &labels.name, &form.name));
    report.push(required_date(&key("birth_date"), &labels.birth_date, form.birth_date));
    report.push(max_length(&key("father_name"), &labels.father_name, &form.father_name));
    report.push(max_length(&key("mother_name"), &labels.mother_name, &form.mother_name));
    report.push(cpf(&key("father_cpf"), &form.father_cpf));
    report.push(cpf(&key("mother_cpf"), &form.mother_cpf));
    report.push(parent_date(
        &key("father_birth_date"),
        &labels.father_role,
        form.father_birth_date,
        form.birth_date,
    ));
    report.push(parent_date(
        &key("mother_birth_date"),
        &labels.mother_role,
        form.mother_birth_date,
        form.birth_date,
    ));
}

pub fn validate_birth(form: &BirthForm) -> ValidationReport {
    let mut report = ValidationReport::new();
    validate_person(&mut report, "registrant", &PersonLabels::registrant(), &form.registrant);
    report
}

pub fn validate_marriage(form: &MarriageForm) -> ValidationReport {
    let mut report = ValidationReport::new();
    report.push(required_date("married_on", "Data do Casamento", form.married_on));
    validate_person(&mut report, "spouse1", &PersonLabels::spouse(1), &form.spouse1);
    validate_person(&mut report, "spouse2", &PersonLabels::spouse(2), &form.spouse2);
    report
}

pub fn validate_death(form: &DeathForm) -> ValidationReport {
    let mut report = ValidationReport::new();
    report.push(required_date("died_on", "Data do Óbito", form.died_on));
    validate_person(&mut report, "deceased", &PersonLabels::deceased(), &form.deceased);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> FormDate {
        FormDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_required_text() {
        let check = required_text("f", "Nome", "");
        assert!(!check.valid);
        assert_eq!(check.message.as_deref(), Some("Nome é obrigatório"));

        assert!(!required_text("f", "Nome", "   \t").valid);
        assert!(required_text("f", "Nome", "  Maria  ").valid);
        assert!(required_text("f", "Nome", "x").valid);
    }

    #[test]
    fn test_required_date() {
        let check = required_date("f", "Data de Nascimento", FormDate::UNSET);
        assert!(!check.valid);
        assert_eq!(check.message.as_deref(), Some("Data de Nascimento é obrigatório"));

        let check = required_date("f", "Data do Óbito", FormDate::INVALID);
        assert!(!check.valid);
        assert_eq!(check.message.as_deref(), Some("Data do Óbito inválida"));

        // No range check: far past and far future are fine
        assert!(required_date("f", "Data", date(1, 1, 1)).valid);
        assert!(required_date("f", "Data", date(9999, 12, 31)).valid);
    }

    #[test]
    fn test_cpf_rule() {
        assert!(cpf("f", "").valid);
        assert!(cpf("f", "   ").valid);
        assert!(cpf("f", "529.982.247-25").valid);
        assert!(cpf("f", "52998224725").valid);

        let check = cpf("f", "529.982.247-26");
        assert!(!check.valid);
        assert_eq!(check.message.as_deref(), Some("CPF inválido"));

        assert!(!cpf("f", "111.111.111-11").valid);
        assert!(!cpf("f", "123").valid);
    }

    #[test]
    fn test_parent_date_rule() {
        let child = date(2000, 1, 1);

        assert!(parent_date("f", "pai", FormDate::UNSET, child).valid);
        assert!(parent_date("f", "pai", date(1970, 6, 15), child).valid);
        assert!(parent_date("f", "pai", date(1999, 12, 31), child).valid);

        // Equal dates fail
        let equal = parent_date("f", "pai", child, child);
        assert!(!equal.valid);

        let unreadable = parent_date("f", "pai", FormDate::INVALID, child);
        assert_eq!(
            unreadable.message.as_deref(),
            Some("Data de nascimento do pai inválida")
        );

        let later = parent_date("f", "mãe", date(2001, 1, 1), child);
        assert!(!later.valid);
        assert_eq!(
            later.message.as_deref(),
            Some("Data de nascimento do mãe deve ser anterior à data de nascimento do registrado")
        );
    }

    #[test]
    fn test_max_length() {
        assert!(max_length("f", "Nome", &"a".repeat(100)).valid);
        let check = max_length("f", "Nome", &"a".repeat(101));
        assert!(!check.valid);
        assert_eq!(
            check.message.as_deref(),
            Some("Nome deve ter no máximo 100 caracteres")
        );
    }

    #[test]
    fn test_blank_name_and_unset_date_both_reported() {
        let form = BirthForm {
            registrant: PersonForm::named("", FormDate::UNSET),
        };
        let report = validate_birth(&form);

        assert!(!report.is_valid());
        assert_eq!(report.message("registrant.name"), Some("Nome é obrigatório"));
        assert_eq!(
            report.message("registrant.birth_date"),
            Some("Data de Nascimento é obrigatório")
        );
        assert_eq!(report.failures().count(), 2);
    }

    #[test]
    fn test_father_born_after_registrant() {
        let mut registrant = PersonForm::named("João", date(2000, 1, 1));
        registrant.father_birth_date = date(2001, 1, 1);
        let report = validate_birth(&BirthForm { registrant });

        assert!(!report.is_valid());
        let message = report.message("registrant.father_birth_date").unwrap();
        assert!(message.contains("do pai deve ser anterior"));
        assert!(report.check("registrant.mother_birth_date").unwrap().valid);
    }

    #[test]
    fn test_valid_minimal_birth() {
        let form = BirthForm {
            registrant: PersonForm::named("Maria Silva", date(1990, 5, 10)),
        };
        let report = validate_birth(&form);
        assert!(report.is_valid());
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn test_marriage_reports_every_field() {
        let mut spouse1 = PersonForm::named("Ana", date(1990, 1, 1));
        spouse1.mother_cpf = "000.000.000-01".into();
        spouse1.mother_birth_date = date(1995, 1, 1);
        let form = MarriageForm {
            married_on: FormDate::UNSET,
            spouse1,
            spouse2: PersonForm::default(),
        };
        let report = validate_marriage(&form);

        assert!(!report.is_valid());
        assert_eq!(report.message("married_on"), Some("Data do Casamento é obrigatório"));
        assert_eq!(report.message("spouse1.mother_cpf"), Some("CPF inválido"));
        assert!(report
            .message("spouse1.mother_birth_date")
            .unwrap()
            .contains("mãe do Cônjuge 1"));
        assert_eq!(report.message("spouse2.name"), Some("Nome do Cônjuge 2 é obrigatório"));
        assert_eq!(
            report.message("spouse2.birth_date"),
            Some("Data de Nascimento do Cônjuge 2 é obrigatório")
        );
        assert_eq!(report.failures().count(), 5);
    }

    #[test]
    fn test_death_requires_death_date() {
        let form = DeathForm {
            died_on: FormDate::UNSET,
            deceased: PersonForm::named("José", date(1930, 3, 3)),
        };
        let report = validate_death(&form);
        assert!(!report.is_valid());
        assert_eq!(report.message("died_on"), Some("Data do Óbito é obrigatório"));
        assert!(report.check("deceased.name").unwrap().valid);
    }

    #[test]
    fn test_parent_date_with_unset_child_fails() {
        // An unset child date is the minimum date, so any set parent date is not earlier
        let mut registrant = PersonForm::named("João", FormDate::UNSET);
        registrant.mother_birth_date = date(1970, 1, 1);
        let report = validate_birth(&BirthForm { registrant });
        assert!(!report.check("registrant.mother_birth_date").unwrap().valid);
    }

    #[test]
    fn test_unreadable_date_reported_with_other_failures() {
        let mut registrant = PersonForm::named("", FormDate::INVALID);
        registrant.father_cpf = "123".into();
        registrant.mother_birth_date = FormDate::INVALID;
        let report = validate_birth(&BirthForm { registrant });

        assert_eq!(report.message("registrant.name"), Some("Nome é obrigatório"));
        assert_eq!(
            report.message("registrant.birth_date"),
            Some("Data de Nascimento inválida")
        );
        assert_eq!(report.message("registrant.father_cpf"), Some("CPF inválido"));
        assert_eq!(
            report.message("registrant.mother_birth_date"),
            Some("Data de nascimento do mãe inválida")
        );
        assert_eq!(report.failures().count(), 4);
    }
}
