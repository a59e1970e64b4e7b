//! Reports NFC card coverage across the access-control directory.
//!
//! Reads the `MEMBER_SYNC__DIRECTORY__*` settings and prints how many
//! non-deactivated directory users have a card.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use member_sync::adapters::UnifiDirectory;
use member_sync::config::AppConfig;

#[derive(Parser)]
#[command(name = "directory-report")]
#[command(about = "Count directory users with and without an NFC card")]
struct Cli {
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load_directory().context("Failed to load directory configuration")?;
    let directory = UnifiDirectory::new(&config).context("Failed to create directory client")?;

    let report = directory
        .card_report()
        .await
        .context("Failed to list directory users")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}
