//! Scrapewatch CLI
//!
//! Command-line interface for starting, watching and collecting the results
//! of a remote scraping job.

mod commands;
mod config;
mod terminal;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scrapewatch")]
#[command(about = "Control and watch a remote business scraping job", long_about = None)]
struct Cli {
    /// Scraper server URL
    #[arg(
        long,
        env = "SCRAPEWATCH_SERVER_URL",
        default_value = "http://localhost:5000"
    )]
    server_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the rendered session on stdout stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "scrapewatch=info,scrapewatch_session=info,scrapewatch_client=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.server_url)?;

    handle_command(cli.command, &config).await
}
