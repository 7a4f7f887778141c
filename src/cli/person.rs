//! Person CLI commands
//!
//! People are created only through registrations; here they can be listed,
//! inspected, and deleted once no record refers to them.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_person_details, format_person_list};
use crate::error::RegistryResult;
use crate::services::RecordService;
use crate::storage::Storage;

/// Person subcommands
#[derive(Subcommand, Debug)]
pub enum PersonCommands {
    /// List all people
    List,
    /// Show a person and the records that refer to them
    Show {
        /// Person ID (e.g. pes-1a2b3c4d)
        person: String,
    },
    /// Delete a person no record refers to
    Delete {
        /// Person ID
        person: String,
    },
}

/// Handle person commands
pub fn handle_person_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PersonCommands,
) -> RegistryResult<()> {
    let service = RecordService::new(storage);
    let date_format = settings.date_format.as_str();

    match cmd {
        PersonCommands::List => {
            println!("{}", format_person_list(&service.list_people()?, date_format));
        }
        PersonCommands::Show { person } => {
            let (person, references) = service.get_person(&person)?;
            print!("{}", format_person_details(&person, &references, date_format));
        }
        PersonCommands::Delete { person } => {
            let deleted = service.delete_person(&person)?;
            println!("Deleted person: {} ({})", deleted.name, deleted.id);
        }
    }

    Ok(())
}
