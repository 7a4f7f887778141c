//! Death record CLI commands

use clap::Subcommand;

use super::forms::PersonArgs;
use super::reject;
use crate::config::settings::Settings;
use crate::display::{format_death_details, format_death_list};
use crate::error::RegistryResult;
use crate::models::{DeathForm, FormDate};
use crate::services::{RecordService, RegistrationService};
use crate::storage::Storage;

/// Death subcommands
#[derive(Subcommand, Debug)]
pub enum DeathCommands {
    /// Register a death
    Add {
        /// Date of death (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long)]
        died_on: Option<String>,

        #[command(flatten)]
        deceased: PersonArgs,
    },
    /// List all death records
    List,
    /// Show a death record
    Show {
        /// Record ID (e.g. obi-1a2b3c4d)
        record: String,
    },
    /// Delete a death record (the deceased is kept)
    Delete {
        /// Record ID
        record: String,
    },
}

/// Handle death commands
pub fn handle_death_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DeathCommands,
) -> RegistryResult<()> {
    let offset = settings.utc_offset()?;
    let date_format = settings.date_format.as_str();
    let records = RecordService::new(storage);

    match cmd {
        DeathCommands::Add { died_on, deceased } => {
            let form = DeathForm {
                died_on: FormDate::from_input(died_on.as_deref()),
                deceased: deceased.to_form(),
            };
            let submission = RegistrationService::new(storage).register_death(&form)?;
            match submission.registration {
                Some(death) => {
                    println!("Registered death: {}", death.record.id);
                    println!();
                    print!("{}", format_death_details(&death, offset, date_format));
                }
                None => return Err(reject(&submission.report)),
            }
        }
        DeathCommands::List => {
            println!("{}", format_death_list(&records.list_deaths()?, offset, date_format));
        }
        DeathCommands::Show { record } => {
            print!("{}", format_death_details(&records.get_death(&record)?, offset, date_format));
        }
        DeathCommands::Delete { record } => {
            let deleted = records.delete_death(&record)?;
            println!("Deleted death record: {}", deleted.id);
        }
    }

    Ok(())
}
