//! Birth Report
//!
//! Births registered within a date range, with the registrant's details.

use chrono::{DateTime, FixedOffset};
use std::io::Write;

use super::{csv_error, header, person_fields, person_headers, DateRange};
use crate::error::RegistryResult;
use crate::models::BirthRegistration;
use crate::services::RecordService;
use crate::storage::Storage;

/// One registered birth
#[derive(Debug, Clone)]
pub struct BirthReportRow {
    /// Registration time in the report's local offset
    pub registered_at: DateTime<FixedOffset>,
    pub registration: BirthRegistration,
}

/// Birth Report
#[derive(Debug, Clone)]
pub struct BirthReport {
    pub range: DateRange,
    pub rows: Vec<BirthReportRow>,
    date_format: String,
}

impl BirthReport {
    /// Generate a birth report, oldest registration first
    pub fn generate(storage: &Storage, range: DateRange, date_format: &str) -> RegistryResult<Self> {
        let records = storage
            .registry
            .births_between(range.start_utc()?, range.end_utc()?)?;

        let service = RecordService::new(storage);
        let rows = records
            .into_iter()
            .map(|record| {
                Ok(BirthReportRow {
                    registered_at: range.to_local(record.registered_at),
                    registration: service.join_birth(record)?,
                })
            })
            .collect::<RegistryResult<Vec<_>>>()?;

        tracing::debug!(rows = rows.len(), "birth report generated");

        Ok(Self {
            range,
            rows,
            date_format: date_format.to_string(),
        })
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = header(
            "Relatório de Nascimentos",
            &self.range,
            self.total(),
            &self.date_format,
        );
        output.push('\n');

        output.push_str(&format!(
            "{:<12} {:<16} {:<30} {:<12}\n",
            "Registro", "Data Registro", "Nome", "Nascimento"
        ));
        output.push_str(&"-".repeat(78));
        output.push('\n');

        for row in &self.rows {
            let person = &row.registration.registrant;
            output.push_str(&format!(
                "{:<12} {:<16} {:<30} {:<12}\n",
                row.registration.record.id.to_string(),
                row.registered_at.format(&format!("{} %H:%M", self.date_format)),
                person.name,
                person.birth_day().format(&self.date_format)
            ));

            let parents: Vec<_> = [&person.father_name, &person.mother_name]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .collect();
            if !parents.is_empty() {
                output.push_str(&format!("{:<29}Filiação: {}\n", "", parents.join(" e ")));
            }
        }

        if self.rows.is_empty() {
            output.push_str("Nenhum registro no período.\n");
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> RegistryResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        let mut headers = vec!["Registro".to_string(), "Data Registro".to_string()];
        headers.extend(person_headers(""));
        csv.write_record(&headers).map_err(csv_error)?;

        for row in &self.rows {
            let mut fields = vec![
                row.registration.record.id.to_string(),
                row.registered_at.to_rfc3339(),
            ];
            fields.extend(person_fields(&row.registration.registrant, &self.date_format));
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
    use crate::models::{BirthRecord, Person, Registration};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegistryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn register(storage: &Storage, name: &str, registered_at: DateTime<chrono::Utc>) {
        let mut registrant = Person::new(name, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        registrant.father_name = Some("José".into());
        registrant.father_cpf = Some("52998224725".into());
        let record = BirthRecord::new(registrant.id, registered_at);
        storage
            .registry
            .save_registration(&Registration::Birth(BirthRegistration { record, registrant }))
            .unwrap();
    }

    fn march_first() -> DateRange {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        DateRange::new(day, day, FixedOffset::west_opt(3 * 3600).unwrap()).unwrap()
    }

    #[test]
    fn test_only_records_in_range() {
        let (_temp_dir, storage) = create_test_storage();
        // Local midnight of 2024-03-01 at UTC-3
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 3, 0, 0).unwrap();

        register(&storage, "Antes", start - Duration::seconds(1));
        register(&storage, "Inicio", start);
        register(&storage, "Fim", start + Duration::hours(24) - Duration::milliseconds(1));
        register(&storage, "Depois", start + Duration::hours(24));

        let report = BirthReport::generate(&storage, march_first(), "%d/%m/%Y").unwrap();
        let names: Vec<_> = report
            .rows
            .iter()
            .map(|r| r.registration.registrant.name.as_str())
            .collect();
        assert_eq!(names, vec!["Inicio", "Fim"]);
        assert_eq!(report.rows[0].registered_at.date_naive(), march_first().start);
    }

    #[test]
    fn test_format_terminal() {
        let (_temp_dir, storage) = create_test_storage();
        register(&storage, "Maria Silva", Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());

        let report = BirthReport::generate(&storage, march_first(), "%d/%m/%Y").unwrap();
        let output = report.format_terminal();
        assert!(output.contains("01/03/2024 a 01/03/2024"));
        assert!(output.contains("Total de registros: 1"));
        assert!(output.contains("Maria Silva"));
        assert!(output.contains("01/02/2024"));
        assert!(output.contains("Filiação: José"));
    }

    #[test]
    fn test_csv_export() {
        let (_temp_dir, storage) = create_test_storage();
        register(&storage, "Silva, Maria", Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());

        let report = BirthReport::generate(&storage, march_first(), "%d/%m/%Y").unwrap();
        let mut output = Vec::new();
        report.export_csv(&mut output).unwrap();

        let csv_string = String::from_utf8(output).unwrap();
        assert!(csv_string.starts_with("Registro,Data Registro,Nome,"));
        // Commas inside names are quoted
        assert!(csv_string.contains("\"Silva, Maria\""));
        assert!(csv_string.contains("529.982.247-25"));
        assert!(csv_string.contains("2024-03-01T09:00:00-03:00"));
    }

    #[test]
    fn test_empty_report() {
        let (_temp_dir, storage) = create_test_storage();
        let report = BirthReport::generate(&storage, march_first(), "%d/%m/%Y").unwrap();
        assert_eq!(report.total(), 0);
        assert!(report.format_terminal().contains("Nenhum registro"));
    }
}
