mod commands;
mod filter_args;

use std::path::PathBuf;
use std::sync::Arc;

use autoscan_pipeline::{Pipeline, ReconciliationStore};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::filter_args::FilterArgs;

#[derive(Debug, Parser)]
#[command(name = "autoscan")]
#[command(about = "Search used-vehicle marketplaces and report new listings")]
struct Cli {
    /// Print results as JSON instead of a listing summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search marketplaces, extract listings and notify about new ones
    Search {
        /// Platform id to search (repeatable); all platforms when omitted
        #[arg(long = "platform", short = 'p')]
        platforms: Vec<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Scrape and extract a single platform without reconciliation
    Scrape {
        /// Platform id, e.g. `mobile`
        platform: String,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print the search URL for every platform
    Urls {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Import vehicle records from a JSON file
    Import {
        /// JSON array of records, or an object with a `vehicles` array
        file: PathBuf,
    },
    /// Extract vehicle records from a file of pasted listing text
    Analyze {
        file: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print the extraction prompt for use with an external assistant
    Prompt {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Send a test message to the configured Telegram chat
    TelegramTest,
    /// Send one vehicle record from a JSON file to the Telegram chat
    TelegramDetail {
        /// JSON object holding a single record
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = autoscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let pipeline = Pipeline::from_app_config(&config, Arc::new(ReconciliationStore::new()))?;

    let result = commands::run(&pipeline, cli.command, cli.json).await;
    pipeline.shutdown().await;
    result
}
