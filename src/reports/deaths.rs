//! Death Report
//!
//! Deaths registered within a date range, with the deceased's details.

use chrono::{DateTime, FixedOffset};
use std::io::Write;

use super::{csv_error, day, header, person_fields, person_headers, DateRange};
use crate::error::RegistryResult;
use crate::models::DeathRegistration;
use crate::services::RecordService;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct DeathReportRow {
    pub registered_at: DateTime<FixedOffset>,
    pub registration: DeathRegistration,
}

/// Death Report
#[derive(Debug, Clone)]
pub struct DeathReport {
    pub range: DateRange,
    pub rows: Vec<DeathReportRow>,
    date_format: String,
}

impl DeathReport {
    pub fn generate(storage: &Storage, range: DateRange, date_format: &str) -> RegistryResult<Self> {
        let records = storage
            .registry
            .deaths_between(range.start_utc()?, range.end_utc()?)?;

        let service = RecordService::new(storage);
        let rows = records
            .into_iter()
            .map(|record| {
                Ok(DeathReportRow {
                    registered_at: range.to_local(record.registered_at),
                    registration: service.join_death(record)?,
                })
            })
            .collect::<RegistryResult<Vec<_>>>()?;

        tracing::debug!(rows = rows.len(), "death report generated");

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
            "Relatório de Óbitos",
            &self.range,
            self.total(),
            &self.date_format,
        );
        output.push('\n');

        output.push_str(&format!(
            "{:<12} {:<16} {:<12} {:<24} {:<12}\n",
            "Registro", "Data Registro", "Óbito", "Falecido", "Nascimento"
        ));
        output.push_str(&"-".repeat(78));
        output.push('\n');

        for row in &self.rows {
            let r = &row.registration;
            output.push_str(&format!(
                "{:<12} {:<16} {:<12} {:<24} {:<12}\n",
                r.record.id.to_string(),
                row.registered_at.format(&format!("{} %H:%M", self.date_format)),
                r.record.death_day().format(&self.date_format),
                r.deceased.name,
                r.deceased.birth_day().format(&self.date_format)
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
            "Data do Óbito".to_string(),
        ];
        headers.extend(person_headers(""));
        csv.write_record(&headers).map_err(csv_error)?;

        for row in &self.rows {
            let r = &row.registration;
            let mut fields = vec![
                r.record.id.to_string(),
                row.registered_at.to_rfc3339(),
                day(r.record.died_on, &self.date_format),
            ];
            fields.extend(person_fields(&r.deceased, &self.date_format));
            csv.write_record(&fields).map_err(csv_error)?;
        }

        csv.flush().map_err(csv_error)?;
        Ok(())
    }
}
