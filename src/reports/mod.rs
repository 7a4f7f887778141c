//! Reports module for the civil registry
//!
//! Date-ranged listings of births, marriages and deaths. Each report selects
//! records by `registered_at` within a [`DateRange`], joins them with their
//! people, and renders to the terminal or CSV.

pub mod births;
pub mod deaths;
pub mod marriages;
pub mod range;

pub use births::BirthReport;
pub use deaths::DeathReport;
pub use marriages::MarriageReport;
pub use range::DateRange;

use chrono::{DateTime, Utc};

use crate::error::RegistryError;
use crate::models::Person;
use crate::services::cpf;

/// A stored calendar date. These are UTC midnight, so no offset is applied.
fn day(date: DateTime<Utc>, date_format: &str) -> String {
    date.date_naive().format(date_format).to_string()
}

fn optional_day(date: Option<DateTime<Utc>>, date_format: &str) -> String {
    date.map(|d| day(d, date_format)).unwrap_or_default()
}

fn optional_cpf(value: Option<&str>) -> String {
    value.map(cpf::format).unwrap_or_default()
}

/// CSV column titles describing one person, prefixed with `who`
fn person_headers(who: &str) -> Vec<String> {
    [
        "Nome",
        "Data de Nascimento",
        "Nome do Pai",
        "Nome da Mãe",
        "Nascimento do Pai",
        "Nascimento da Mãe",
        "CPF do Pai",
        "CPF da Mãe",
    ]
    .iter()
    .map(|title| {
        if who.is_empty() {
            title.to_string()
        } else {
            format!("{} ({})", title, who)
        }
    })
    .collect()
}

/// CSV cells for one person, matching [`person_headers`]
fn person_fields(person: &Person, date_format: &str) -> Vec<String> {
    vec![
        person.name.clone(),
        day(person.birth_date, date_format),
        person.father_name.clone().unwrap_or_default(),
        person.mother_name.clone().unwrap_or_default(),
        optional_day(person.father_birth_date, date_format),
        optional_day(person.mother_birth_date, date_format),
        optional_cpf(person.father_cpf.as_deref()),
        optional_cpf(person.mother_cpf.as_deref()),
    ]
}

fn csv_error(e: impl std::fmt::Display) -> RegistryError {
    RegistryError::Export(e.to_string())
}

/// Header block shared by every report
fn header(title: &str, range: &DateRange, total: usize, date_format: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{}: {} a {}\n",
        title,
        range.start.format(date_format),
        range.end.format(date_format)
    ));
    output.push_str(&"=".repeat(78));
    output.push('\n');
    output.push_str(&format!("Total de registros: {}\n", total));
    output
}
