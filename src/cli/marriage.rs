//! Marriage record CLI commands

use clap::Subcommand;

use super::forms::SpouseArgs;
use super::reject;
use crate::config::settings::Settings;
use crate::display::{format_marriage_details, format_marriage_list};
use crate::error::RegistryResult;
use crate::models::{FormDate, MarriageForm};
use crate::services::{RecordService, RegistrationService};
use crate::storage::Storage;

/// Marriage subcommands
#[derive(Subcommand, Debug)]
pub enum MarriageCommands {
    /// Register a marriage
    Add {
        /// Marriage date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long)]
        married_on: Option<String>,

        #[command(flatten)]
        spouses: SpouseArgs,
    },
    /// List all marriage records
    List,
    /// Show a marriage record
    Show {
        /// Record ID (e.g. cas-1a2b3c4d)
        record: String,
    },
    /// Delete a marriage record (the spouses are kept)
    Delete {
        /// Record ID
        record: String,
    },
}

/// Handle marriage commands
pub fn handle_marriage_command(
    storage: &Storage,
    settings: &Settings,
    cmd: MarriageCommands,
) -> RegistryResult<()> {
    let offset = settings.utc_offset()?;
    let date_format = settings.date_format.as_str();
    let records = RecordService::new(storage);

    match cmd {
        MarriageCommands::Add {
            married_on,
            spouses,
        } => {
            let form = MarriageForm {
                married_on: FormDate::from_input(married_on.as_deref()),
                spouse1: spouses.spouse1(),
                spouse2: spouses.spouse2(),
            };
            let submission = RegistrationService::new(storage).register_marriage(&form)?;
            match submission.registration {
                Some(marriage) => {
                    println!("Registered marriage: {}", marriage.record.id);
                    println!();
                    print!("{}", format_marriage_details(&marriage, offset, date_format));
                }
                None => return Err(reject(&submission.report)),
            }
        }
        MarriageCommands::List => {
            println!(
                "{}",
                format_marriage_list(&records.list_marriages()?, offset, date_format)
            );
        }
        MarriageCommands::Show { record } => {
            print!(
                "{}",
                format_marriage_details(&records.get_marriage(&record)?, offset, date_format)
            );
        }
        MarriageCommands::Delete { record } => {
            let deleted = records.delete_marriage(&record)?;
            println!("Deleted marriage record: {}", deleted.id);
        }
    }

    Ok(())
}
