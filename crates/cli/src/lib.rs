pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use pulse_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "pulse",
    about = "Pulse customer snapshot CLI",
    long_about = "Derive customer snapshots (KPIs, personality profile, talking points, next best action) from CRM history.",
    after_help = "Examples:\n  pulse migrate\n  pulse seed\n  pulse snapshot --customer-id 1\n  pulse config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the idempotent demo customer dataset")]
    Seed,
    #[command(about = "Assemble a customer snapshot and print it as JSON")]
    Snapshot {
        #[arg(long, help = "Customer id to snapshot")]
        customer_id: i64,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

fn init_logging(config: &AppConfig) {
    use pulse_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            let _ = tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .compact()
                .try_init();
        }
        Pretty => {
            let _ = tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .pretty()
                .try_init();
        }
        Json => {
            let _ = tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .json()
                .try_init();
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Best effort: a broken config is reported by the command itself.
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Snapshot { customer_id } => commands::snapshot::run(customer_id),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
