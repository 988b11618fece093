//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod form;
mod job;
mod results;
mod watch;

pub use form::FormArgs;

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use crate::config::Config;

/// Default file name for the CSV export
pub const DEFAULT_CSV_PATH: &str = "scraped_businesses.csv";

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start a scraping job and return immediately
    Start {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Send the stop signal to the running job
    Stop,
    /// Show the current job status
    Status,
    /// Show the rows scraped so far
    Results {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Save the results as CSV
    Download {
        /// Destination file
        #[arg(short, long, default_value = DEFAULT_CSV_PATH)]
        output: PathBuf,
    },
    /// Start a job and follow it until it ends
    Watch {
        #[command(flatten)]
        form: FormArgs,

        /// Save the results as CSV once the job ends
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Start { form } => job::start(config, &form.into_form()).await,
        Commands::Stop => job::stop(config).await,
        Commands::Status => job::status(config).await,
        Commands::Results { json } => results::show(config, json).await,
        Commands::Download { output } => results::download(config, &output).await,
        Commands::Watch { form, output } => {
            watch::watch(config, &form.into_form(), output.as_deref()).await
        }
    }
}
