//! Result command handlers
//!
//! Listing the scraped rows and saving the CSV export.

use anyhow::{Context, Result};
use colored::*;
use scrapewatch_client::ScraperClient;
use scrapewatch_core::ResultRecord;
use std::path::Path;

use super::job::explain;
use crate::config::Config;
use crate::terminal::{header_line, row_line};

/// Fetch and display the current result set
pub async fn show(config: &Config, json: bool) -> Result<()> {
    let client = config.client()?;
    let records = client
        .results()
        .await
        .context("Failed to fetch results")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print_results(&records);
    }

    Ok(())
}

/// Save the CSV export to `output`
pub async fn download(config: &Config, output: &Path) -> Result<()> {
    let client = config.client()?;
    save_csv(&client, output).await
}

/// Download the CSV export and write it to `output`
///
/// An empty result set is reported, not treated as a failure.
pub(crate) async fn save_csv(client: &ScraperClient, output: &Path) -> Result<()> {
    let csv = match client.download_csv().await {
        Ok(csv) => csv,
        Err(e) if e.is_not_found() => {
            let message = e.server_message().unwrap_or("No data to download.");
            println!("{}", message.yellow());
            return Ok(());
        }
        Err(e) => return Err(explain(e)).context("Failed to download results"),
    };

    tokio::fs::write(output, &csv)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} Saved {} bytes to {}",
        "✓".green(),
        csv.len(),
        output.display().to_string().cyan()
    );
    Ok(())
}

fn print_results(records: &[ResultRecord]) {
    if records.is_empty() {
        println!("{}", "No results yet.".yellow());
        return;
    }

    println!("{}", format!("Found {} business(es):", records.len()).bold());
    println!();
    println!("{}", header_line().bold());
    println!("{}", "─".repeat(header_line().chars().count()).dimmed());
    for record in records {
        println!("{}", row_line(record));
    }
}
