//! Visa status CLI
//!
//! Local execution entry point for one-off status checks.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use visa_status::{
    error::Result,
    models::{Config, VisaSearchParams},
    services::KoreaVisaClient,
};

/// visa-status - Korean visa application status checker
#[derive(Parser, Debug)]
#[command(
    name = "visa-status",
    version,
    about = "Checks Korean visa application status against the government portal"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the status of a visa application
    Check {
        /// Passport number (letters and digits only)
        #[arg(long)]
        passport: String,

        /// Full name in English
        #[arg(long)]
        name: String,

        /// Date of birth in YYYY-MM-DD format
        #[arg(long)]
        birth_date: String,

        /// Portal search channel code (default: embassy record search)
        #[arg(long)]
        channel: Option<String>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&cli.config)?;
    log::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Check {
            passport,
            name,
            birth_date,
            channel,
        } => {
            let params =
                VisaSearchParams::new(&passport, &name, &birth_date, channel.as_deref())?;

            let client = KoreaVisaClient::new(config)?;
            let report = client.check_status(&params).await?;

            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK (portal: {})", config.base_url);
        }
    }

    Ok(())
}
