//! sportdesk command line
//!
//! Loads the dashboard listings from the upstream API and prints them.

#![forbid(unsafe_code)]

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use sportdesk_admin::{Dashboard, ListingKind, render};
use sportdesk_client::ApiClient;
use sportdesk_core::{Config, Error, ItemId};
use std::path::PathBuf;
use tracing::info;

/// Command line interface for sportdesk
#[derive(Parser)]
#[command(
    name = "sportdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Admin tooling for the sports-facility dashboard API"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long)]
    json: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Load a listing and print every item
    List {
        /// Listing to load (users, clubs)
        listing: ListingKind,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Sort on a sortable column field
        #[arg(long, value_name = "FIELD")]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Load a listing and print one item's details
    Show {
        /// Listing to load (users, clubs)
        listing: ListingKind,

        /// Item id
        id: ItemId,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Validate and print the resolved configuration
    Config {
        /// Print the configuration as TOML
        #[arg(short, long)]
        show: bool,
    },
}

/// Output format for listings and details
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for development convenience)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = Config::load_from(cli.config.as_deref())
        .with_context(|| "Failed to load configuration")?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    let format = if cli.json { "json" } else { config.logging.format.as_str() };
    sportdesk_core::init_logging(level, format)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        "sportdesk starting"
    );

    match cli.command {
        Commands::List {
            listing,
            format,
            sort,
            desc,
        } => list(&config, listing, format, sort.as_deref(), desc).await,
        Commands::Show {
            listing,
            id,
            format,
        } => show(&config, listing, &id, format).await,
        Commands::Config { show } => {
            if show {
                println!("{}", toml::to_string_pretty(&config)?);
            } else {
                println!("Configuration is valid");
            }
            Ok(())
        }
    }
}

/// Load a listing through a fresh dashboard
async fn load(config: &Config, listing: ListingKind) -> Result<Dashboard<ApiClient>> {
    let dashboard = Dashboard::from_config(listing, config)?;
    dashboard
        .refresh()
        .await
        .with_context(|| format!("Failed to load {} from {}", listing, dashboard.start_url()))?;
    Ok(dashboard)
}

async fn list(
    config: &Config,
    listing: ListingKind,
    format: OutputFormat,
    sort: Option<&str>,
    descending: bool,
) -> Result<()> {
    let dashboard = load(config, listing).await?;
    let mut items = dashboard.snapshot().into_items();

    if let Some(field) = sort {
        if let Err(message) = listing.sort(&mut items, field, descending) {
            bail!(message);
        }
    }

    match format {
        OutputFormat::Table => print!("{}", render::table(listing, &items)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&items)?),
    }
    Ok(())
}

async fn show(
    config: &Config,
    listing: ListingKind,
    id: &ItemId,
    format: OutputFormat,
) -> Result<()> {
    let dashboard = load(config, listing).await?;

    let not_found = || Error::not_found(format!("{} {id}", listing.noun()));
    if !dashboard.view_item(id) {
        return Err(not_found().into());
    }

    let view = dashboard.view();
    let details = view.read().selected_details().ok_or_else(not_found)?;

    match format {
        OutputFormat::Table => print!("{}", render::details(&details)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&details)?),
    }
    Ok(())
}
