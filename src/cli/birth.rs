//! Birth record CLI commands

use clap::Subcommand;

use super::forms::PersonArgs;
use super::reject;
use crate::config::settings::Settings;
use crate::display::{format_birth_details, format_birth_list};
use crate::error::RegistryResult;
use crate::models::BirthForm;
use crate::services::{RecordService, RegistrationService};
use crate::storage::Storage;

/// Birth subcommands
#[derive(Subcommand, Debug)]
pub enum BirthCommands {
    /// Register a birth
    Add {
        #[command(flatten)]
        registrant: PersonArgs,
    },
    /// List all birth records
    List,
    /// Show a birth record
    Show {
        /// Record ID (e.g. nas-1a2b3c4d)
        record: String,
    },
    /// Delete a birth record (the registrant is kept)
    Delete {
        /// Record ID
        record: String,
    },
}

/// Handle birth commands
pub fn handle_birth_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BirthCommands,
) -> RegistryResult<()> {
    let offset = settings.utc_offset()?;
    let date_format = settings.date_format.as_str();
    let records = RecordService::new(storage);

    match cmd {
        BirthCommands::Add { registrant } => {
            let form = BirthForm {
                registrant: registrant.to_form(),
            };
            let submission = RegistrationService::new(storage).register_birth(&form)?;
            match submission.registration {
                Some(birth) => {
                    println!("Registered birth: {}", birth.record.id);
                    println!();
                    print!("{}", format_birth_details(&birth, offset, date_format));
                }
                None => return Err(reject(&submission.report)),
            }
        }
        BirthCommands::List => {
            println!("{}", format_birth_list(&records.list_births()?, offset, date_format));
        }
        BirthCommands::Show { record } => {
            print!("{}", format_birth_details(&records.get_birth(&record)?, offset, date_format));
        }
        BirthCommands::Delete { record } => {
            let deleted = records.delete_birth(&record)?;
            println!("Deleted birth record: {}", deleted.id);
        }
    }

    Ok(())
}
