//! Marriage Report
//!
//! Marriages registered within a date range, with both spouses.

use chrono::{DateTime, FixedOffset};
use std::io::Write;

use super::{csv_error, day, header, person_fields, person_headers, DateRange};
use crate::error::RegistryResult;
use crate::models::MarriageRegistration;
use crate::services::RecordService;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct MarriageReportRow {
    pub registered_at: DateTime<FixedOffset>,
    pub registration: MarriageRegistration,
}

/// Marriage Report
#[derive(Debug, Clone)]
pub struct MarriageReport {
    pub range: DateRange,
    pub rows: Vec<MarriageReportRow>,
    date_format: String,
}

impl MarriageReport {
    pub fn generate(storage: &Storage, range: DateRange, date_format: &str) -> RegistryResult<Self> {
        let records = storage
            .registry
            .marriages_between(range.start_utc()?, range.end_utc()?)?;

        let service = RecordService::new(storage);
        let rows = records
            .into_iter()
            .map(|record| {
                Ok(MarriageReportRow {
                    registered_at: range.to_local(record.registered_at),
                    registration: service.join_marriage(record)?,
                })
            })
            .collect::<RegistryResult<Vec<_>>>()?;

        tracing::debug!(rows = rows.len(), "marriage report generated");

        Ok(Self {
            range,
            rows,
            date_format: date_format.to_string(),
        })
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn format_terminal(&self) -> String {
        let mut output = header(
            "Relatório de Casamentos",
            &self.range,
            self.total(),
            &self.date_format,
        );
        output.push('\n');

        output.push_str(&format!(
            "{:<12} {:<16} {:<12} {}\n",
            "Registro", "Data Registro", "Casamento", "Cônjuges"
        ));
        output.push_str(&"-".repeat(78));
        output.push('\n');

        for row in &self.rows {
            let r = &row.registration;
            output.push_str(&format!(
                "{:<12} {:<16} {:<12} {} e {}\n",
                r.record.id.to_string(),
                row.registered_at.format(&format!("{} %H:%M", self.date_format)),
                r.record.marriage_day().format(&self.date_format),
                r.spouse1.name,
                r.spouse2.name
            ));
        }

        if self.rows.is_empty() {
            output.push_str("Nenhum registro no período.\n");
        }

        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> RegistryResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        let mut headers = vec![
            "Registro".to_string(),
            "Data Registro".to_string(),
            "Data do Casamento".to_string(),
        ];
        headers.extend(person_headers("Cônjuge 1"));
        headers.extend(person_headers("Cônjuge 2"));
        csv.write_record(&headers).map_err(csv_error)?;

        for row in &self.rows {
            let r = &row.registration;
            let mut fields = vec![
                r.record.id.to_string(),
                row.registered_at.to_rfc3339(),
                day(r.record.married_on, &self.date_format),
            ];
            fields.extend(person_fields(&r.spouse1, &self.date_format));
            fields.extend(person_fields(&r.spouse2, &self.date_format));
            csv.write_record(&fields).map_err(csv_error)?;
        }

        csv.flush().map_err(csv_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::RegistryPaths;
    use crate::models::{FormDate, MarriageForm, PersonForm};
    use crate::services::RegistrationService;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegistryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> FormDate {
        FormDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn around_today() -> DateRange {
        let offset = FixedOffset::east_opt(0).unwrap();
        let today = Utc::now().date_naive();
        DateRange::new(today - Duration::days(1), today + Duration::days(1), offset).unwrap()
    }

    #[test]
    fn test_report_lists_both_spouses() {
        let (_temp_dir, storage) = create_test_storage();
        RegistrationService::new(&storage)
            .register_marriage(&MarriageForm {
                married_on: date(2015, 9, 12),
                spouse1: PersonForm::named("Ana Lima", date(1990, 1, 1)),
                spouse2: PersonForm::named("Bruno Costa", date(1989, 2, 2)),
            })
            .unwrap();

        let report = MarriageReport::generate(&storage, around_today(), "%d/%m/%Y").unwrap();
        assert_eq!(report.total(), 1);

        let output = report.format_terminal();
        assert!(output.contains("Ana Lima e Bruno Costa"));
        assert!(output.contains("12/09/2015"));

        let mut csv_output = Vec::new();
        report.export_csv(&mut csv_output).unwrap();
        let csv_string = String::from_utf8(csv_output).unwrap();
        assert!(csv_string.contains("Nome (Cônjuge 1)"));
        assert!(csv_string.contains("Nome (Cônjuge 2)"));
        assert!(csv_string.contains("Bruno Costa"));
    }

    #[test]
    fn test_range_in_the_past_is_empty() {
        let (_temp_dir, storage) = create_test_storage();
        RegistrationService::new(&storage)
            .register_marriage(&MarriageForm {
                married_on: date(2015, 9, 12),
                spouse1: PersonForm::named("Ana", date(1990, 1, 1)),
                spouse2: PersonForm::named("Bruno", date(1989, 2, 2)),
            })
            .unwrap();

        let day = date(2000, 1, 1).date();
        let range = DateRange::new(day, day, FixedOffset::east_opt(0).unwrap()).unwrap();
        let report = MarriageReport::generate(&storage, range, "%d/%m/%Y").unwrap();
        assert_eq!(report.total(), 0);
    }
}
