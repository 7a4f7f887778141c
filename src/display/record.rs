//! Record display formatting
//!
//! Registration times are shown in the office's local offset; stored
//! calendar dates (birth, marriage, death) are shown as-is.

use chrono::{DateTime, FixedOffset, Utc};

use super::person::person_lines;
use crate::models::{BirthRegistration, DeathRegistration, MarriageRegistration};
use crate::services::ValidationReport;

fn local_time(instant: DateTime<Utc>, offset: FixedOffset, date_format: &str) -> String {
    instant
        .with_timezone(&offset)
        .format(&format!("{} %H:%M", date_format))
        .to_string()
}

/// Generic table: fixed-width id and time columns, free-form description
fn record_table(rows: Vec<(String, String, String)>, empty: &str, noun: &str) -> String {
    if rows.is_empty() {
        return empty.to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<12}  {:<16}  {}\n", "ID", "Registered", "Details"));
    output.push_str(&format!("{:-<12}  {:-<16}  {:-<30}\n", "", "", ""));

    let count = rows.len();
    for (id, registered, details) in rows {
        output.push_str(&format!("{:<12}  {:<16}  {}\n", id, registered, details));
    }

    output.push_str(&format!("\n{} {}", count, noun));
    output
}

pub fn format_birth_list(
    births: &[BirthRegistration],
    offset: FixedOffset,
    date_format: &str,
) -> String {
    let rows = births
        .iter()
        .map(|b| {
            (
                b.record.id.to_string(),
                local_time(b.record.registered_at, offset, date_format),
                format!(
                    "{} (born {})",
                    b.registrant.name,
                    b.registrant.birth_day().format(date_format)
                ),
            )
        })
        .collect();
    record_table(rows, "No birth records found.", "births")
}

pub fn format_marriage_list(
    marriages: &[MarriageRegistration],
    offset: FixedOffset,
    date_format: &str,
) -> String {
    let rows = marriages
        .iter()
        .map(|m| {
            (
                m.record.id.to_string(),
                local_time(m.record.registered_at, offset, date_format),
                format!(
                    "{} & {} (married {})",
                    m.spouse1.name,
                    m.spouse2.name,
                    m.record.marriage_day().format(date_format)
                ),
            )
        })
        .collect();
    record_table(rows, "No marriage records found.", "marriages")
}

pub fn format_death_list(
    deaths: &[DeathRegistration],
    offset: FixedOffset,
    date_format: &str,
) -> String {
    let rows = deaths
        .iter()
        .map(|d| {
            (
                d.record.id.to_string(),
                local_time(d.record.registered_at, offset, date_format),
                format!(
                    "{} (died {})",
                    d.deceased.name,
                    d.record.death_day().format(date_format)
                ),
            )
        })
        .collect();
    record_table(rows, "No death records found.", "deaths")
}

pub fn format_birth_details(
    birth: &BirthRegistration,
    offset: FixedOffset,
    date_format: &str,
) -> String {
    let mut output = format!("Birth record {}\n", birth.record.id);
    output.push_str(&format!(
        "  Registered: {}\n",
        local_time(birth.record.registered_at, offset, date_format)
    ));
    output.push_str(&format!("  Registrant ({}):\n", birth.registrant.id));
    output.push_str(&person_lines(&birth.registrant, date_format, "    "));
    output
}

pub fn format_marriage_details(
    marriage: &MarriageRegistration,
    offset: FixedOffset,
    date_format: &str,
) -> String {
    let mut output = format!("Marriage record {}\n", marriage.record.id);
    output.push_str(&format!(
        "  Registered: {}\n",
        local_time(marriage.record.registered_at, offset, date_format)
    ));
    output.push_str(&format!(
        "  Married on: {}\n",
        marriage.record.marriage_day().format(date_format)
    ));
    for (n, spouse) in [(1, &marriage.spouse1), (2, &marriage.spouse2)] {
        output.push_str(&format!("  Spouse {} ({}):\n", n, spouse.id));
        output.push_str(&person_lines(spouse, date_format, "    "));
    }
    output
}

pub fn format_death_details(
    death: &DeathRegistration,
    offset: FixedOffset,
    date_format: &str,
) -> String {
    let mut output = format!("Death record {}\n", death.record.id);
    output.push_str(&format!(
        "  Registered: {}\n",
        local_time(death.record.registered_at, offset, date_format)
    ));
    output.push_str(&format!(
        "  Died on:    {}\n",
        death.record.death_day().format(date_format)
    ));
    output.push_str(&format!("  Deceased ({}):\n", death.deceased.id));
    output.push_str(&person_lines(&death.deceased, date_format, "    "));
    output
}

/// Every failing field of a rejected form, one per line
pub fn format_validation_failures(report: &ValidationReport) -> String {
    let mut output = String::from("Registration rejected:\n");
    for check in report.failures() {
        output.push_str(&format!(
            "  {:<28} {}\n",
            check.field,
            check.message.as_deref().unwrap_or_default()
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BirthRecord, MarriageRecord, Person};
    use crate::services::validation::FieldCheck;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn brt() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    #[test]
    fn test_birth_list_uses_local_time() {
        let registrant = Person::new("Maria Silva", utc(1990, 5, 10, 0));
        let record = BirthRecord::new(registrant.id, utc(2024, 3, 2, 1));
        let output = format_birth_list(&[BirthRegistration { record, registrant }], brt(), "%d/%m/%Y");

        // 01:00 UTC is still the previous day at UTC-3
        assert!(output.contains("01/03/2024 22:00"));
        assert!(output.contains("Maria Silva (born 10/05/1990)"));
        assert!(output.contains("1 births"));
    }

    #[test]
    fn test_marriage_details() {
        let spouse1 = Person::new("Ana", utc(1990, 1, 1, 0));
        let spouse2 = Person::new("Bruno", utc(1989, 2, 2, 0));
        let record = MarriageRecord::new(spouse1.id, spouse2.id, utc(2015, 9, 12, 0), utc(2015, 9, 20, 15));
        let marriage = MarriageRegistration {
            record,
            spouse1,
            spouse2,
        };

        let output = format_marriage_details(&marriage, brt(), "%d/%m/%Y");
        assert!(output.contains("Married on: 12/09/2015"));
        assert!(output.contains("Spouse 1"));
        assert!(output.contains("Name:       Bruno"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_death_list(&[], brt(), "%d/%m/%Y"), "No death records found.");
    }

    #[test]
    fn test_validation_failures() {
        let mut report = ValidationReport::new();
        report.push(FieldCheck::pass("registrant.name"));
        report.push(FieldCheck::fail("registrant.birth_date", "Data de Nascimento é obrigatório"));

        let output = format_validation_failures(&report);
        assert!(output.contains("registrant.birth_date"));
        assert!(output.contains("Data de Nascimento é obrigatório"));
        assert!(!output.contains("registrant.name"));
    }
}
