pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use upsalg_core::config::{AppConfig, LoadOptions, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "upsalg",
    about = "Upsalg operator CLI",
    long_about = "Operate the Upsalg catalog: migrations, feed sync, seeding, search, and upgrade recommendations.",
    after_help = "Examples:\n  upsalg migrate\n  upsalg sync\n  upsalg recommend \"bærbar computer\"\n  upsalg doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the deterministic demo catalog into the database")]
    Seed,
    #[command(about = "Pull configured queries from the catalog feed and upsert the results")]
    Sync,
    #[command(about = "Search the stored catalog and print matching products as JSON")]
    Search {
        #[arg(help = "Search query matched against product name and brand")]
        query: String,
    },
    #[command(
        about = "Recommend upgrades: the first search hit is the reference, the rest are scored against it"
    )]
    Recommend {
        #[arg(help = "Search query; its first hit becomes the reference product")]
        query: String,
    },
    #[command(about = "Print the number of stored products")]
    Count,
    #[command(about = "Inspect effective configuration values with redaction")]
    Config,
    #[command(about = "Validate config, database connectivity, and feed readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

/// Initialize the tracing subscriber from config. Binary entry point only;
/// library callers and tests must not install a global subscriber.
pub fn init_logging() {
    use tracing::Level;

    let logging = AppConfig::load(LoadOptions::default())
        .map(|config| config.logging)
        .unwrap_or_else(|_| AppConfig::default().logging);
    let log_level = logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match logging.format {
        LogFormat::Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Sync => commands::sync::run(),
        Command::Search { query } => commands::search::run(&query),
        Command::Recommend { query } => commands::recommend::run(&query),
        Command::Count => commands::count::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
