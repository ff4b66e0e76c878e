//! Contable CLI
//!
//! Command-line front end for the journal-entry engine: amounts in words,
//! amount parsing, and posting of entries described in JSON files.

mod posting;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contable_core::{AmountFormat, AmountParser, NumberToWords};
use contable_shared::AppConfig;
use contable_shared::config::LoggingConfig;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "contable")]
#[command(about = "Journal entry validation, posting and ledger reports")]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines (overrides configuration)
    #[arg(long, env = "CONTABLE_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an amount in Spanish words, e.g. "DIEZ MIL QUINIENTOS VEINTE CON 93/100"
    Words {
        /// Amount, optionally with currency symbol and grouping (e.g. "$10,520.93")
        amount: String,
    },

    /// Parse a formatted amount and print its exact value
    Parse {
        /// Amount text (e.g. "Bs 1,000.00")
        text: String,
    },

    /// Validate and post the journal entries of a JSON file, printing ledger reports
    Post {
        /// Path to the posting file
        file: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging, cli.log_json);
    debug!(?config, "configuration loaded");

    let parser = AmountParser::new(AmountFormat::from(&config.amounts));

    match cli.command {
        Commands::Words { amount } => {
            let value = parser.parse(&amount)?;
            println!("{}", NumberToWords::convert(value)?);
        }
        Commands::Parse { text } => {
            let value = parser.parse(&text)?;
            println!("{value}\t{}", parser.format(value));
        }
        Commands::Post { file, pretty } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            let input: posting::PostingFile = serde_json::from_str(&raw)
                .with_context(|| format!("cannot parse {}", file.display()))?;
            info!(path = %file.display(), entries = input.entries.len(), "posting file");

            let summaries = posting::post_file(input, &parser, config.ledger.default_currency)?;
            let output = if pretty {
                serde_json::to_string_pretty(&summaries)?
            } else {
                serde_json::to_string(&summaries)?
            };
            println!("{output}");
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig, force_json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json || force_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}
