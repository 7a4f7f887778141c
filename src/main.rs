use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use registro::cli::{
    handle_birth_command, handle_death_command, handle_export_command, handle_marriage_command,
    handle_person_command, handle_report_command,
};
use registro::config::{paths::RegistryPaths, settings::Settings};
use registro::storage::{initialize_storage, needs_initialization, Storage};

#[derive(Parser)]
#[command(
    name = "registro",
    version,
    about = "Civil registry for births, marriages and deaths",
    long_about = "Registers births, marriages and deaths, validating every field \
                  (including CPF check digits) before anything is stored, and \
                  produces date-ranged reports with CSV export."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the registry data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Birth records
    #[command(subcommand, alias = "nascimento")]
    Birth(registro::cli::BirthCommands),

    /// Marriage records
    #[command(subcommand, alias = "casamento")]
    Marriage(registro::cli::MarriageCommands),

    /// Death records
    #[command(subcommand, alias = "obito")]
    Death(registro::cli::DeathCommands),

    /// People referenced by records
    #[command(subcommand, alias = "pessoa")]
    Person(registro::cli::PersonCommands),

    /// Date-ranged reports
    #[command(subcommand)]
    Report(registro::cli::ReportCommands),

    /// Export the whole registry
    #[command(subcommand)]
    Export(registro::cli::ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let paths = RegistryPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?.with_audit(settings.audit_enabled);
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            if !needs_initialization(&paths) {
                println!("Registry already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }
            println!("Initializing registry at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'registro birth add --help' to register a birth.");
        }
        Some(Commands::Config) => {
            println!("Registro Civil Configuration");
            println!("============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Registry file:    {}", paths.registry_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Date format:     {}", settings.date_format);
            println!("  UTC offset:      {} minutes", settings.utc_offset_minutes);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        Some(Commands::Birth(cmd)) => handle_birth_command(&storage, &settings, cmd)?,
        Some(Commands::Marriage(cmd)) => handle_marriage_command(&storage, &settings, cmd)?,
        Some(Commands::Death(cmd)) => handle_death_command(&storage, &settings, cmd)?,
        Some(Commands::Person(cmd)) => handle_person_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Audit { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("Registro Civil - births, marriages and deaths");
            println!();
            println!("Run 'registro --help' for usage information.");
        }
    }

    Ok(())
}
