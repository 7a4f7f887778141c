//! CLI commands for reports

use chrono::{Datelike, NaiveDate, Utc};
use clap::{Args, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use super::export::create_output;
use crate::config::settings::Settings;
use crate::error::{RegistryError, RegistryResult};
use crate::models::FormDate;
use crate::reports::{BirthReport, DateRange, DeathReport, MarriageReport};
use crate::storage::Storage;

/// Date range and output shared by every report
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// First registration date, inclusive (YYYY-MM-DD or DD/MM/YYYY; default: first of this month)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last registration date, inclusive (default: today)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Export to CSV file instead of printing
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Births registered in a date range
    #[command(alias = "nascimentos")]
    Births(ReportArgs),

    /// Marriages registered in a date range
    #[command(alias = "casamentos")]
    Marriages(ReportArgs),

    /// Deaths registered in a date range
    #[command(alias = "obitos")]
    Deaths(ReportArgs),
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> RegistryResult<()> {
    let date_format = settings.date_format.as_str();

    match cmd {
        ReportCommands::Births(args) => {
            let range = resolve_range(settings, &args)?;
            let report = BirthReport::generate(storage, range, date_format)?;
            emit(args.output, report.total(), |w| report.export_csv(w), || {
                report.format_terminal()
            })
        }
        ReportCommands::Marriages(args) => {
            let range = resolve_range(settings, &args)?;
            let report = MarriageReport::generate(storage, range, date_format)?;
            emit(args.output, report.total(), |w| report.export_csv(w), || {
                report.format_terminal()
            })
        }
        ReportCommands::Deaths(args) => {
            let range = resolve_range(settings, &args)?;
            let report = DeathReport::generate(storage, range, date_format)?;
            emit(args.output, report.total(), |w| report.export_csv(w), || {
                report.format_terminal()
            })
        }
    }
}

fn parse_date(value: &str) -> RegistryResult<NaiveDate> {
    value.parse::<FormDate>().map(|d| d.date())
}

/// Default range: first day of the current local month through today
fn resolve_range(settings: &Settings, args: &ReportArgs) -> RegistryResult<DateRange> {
    let offset = settings.utc_offset()?;
    let today = Utc::now().with_timezone(&offset).date_naive();

    let start = match &args.start {
        Some(s) => parse_date(s)?,
        None => today.with_day(1).unwrap_or(today),
    };
    let end = match &args.end {
        Some(e) => parse_date(e)?,
        None => today,
    };

    DateRange::new(start, end, offset)
}

/// Write CSV to `output` when given, otherwise print to the terminal
fn emit<E, T>(output: Option<PathBuf>, total: usize, export: E, terminal: T) -> RegistryResult<()>
where
    E: FnOnce(&mut dyn Write) -> RegistryResult<()>,
    T: FnOnce() -> String,
{
    match output {
        Some(path) => {
            let mut writer = create_output(&path)?;
            export(&mut writer)?;
            writer
                .flush()
                .map_err(|e| RegistryError::Export(e.to_string()))?;
            println!("Exported {} records to: {}", total, path.display());
        }
        None => println!("{}", terminal()),
    }
    Ok(())
}
