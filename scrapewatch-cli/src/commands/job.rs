//! Job command handlers
//!
//! One-shot job control: start, stop and a status snapshot.

use anyhow::{Context, Result};
use colored::*;
use scrapewatch_client::ClientError;
use scrapewatch_core::{RawForm, StatusSnapshot, format_percent};

use crate::config::Config;

/// Validate the form and ask the server to start a job
pub async fn start(config: &Config, form: &RawForm) -> Result<()> {
    let job = form.parse().context("Invalid job parameters")?;
    let client = config.client()?;

    let reply = match client.start_job(&job).await {
        Ok(reply) => reply,
        Err(e) => return Err(explain(e)).context("Job was not started"),
    };

    if !reply.is_success() {
        anyhow::bail!("Server declined to start the job: {}", reply.message);
    }

    println!("{} {}", "✓".green(), reply.message);
    println!(
        "  Searching {} in {} zipcode(s)",
        job.search_term.cyan(),
        job.zipcodes.len()
    );
    println!(
        "  {}",
        "Follow progress with `scrapewatch status`".dimmed()
    );

    Ok(())
}

/// Send the stop signal
pub async fn stop(config: &Config) -> Result<()> {
    let client = config.client()?;
    let reply = client
        .stop_job()
        .await
        .map_err(explain)
        .context("Failed to send the stop signal")?;

    println!("{} {}", "■".yellow(), reply.message);
    Ok(())
}

/// Fetch and display the current status
pub async fn status(config: &Config) -> Result<()> {
    let client = config.client()?;
    let snapshot = client
        .status()
        .await
        .context("Failed to fetch job status")?;

    print_status_details(&snapshot);
    Ok(())
}

/// Prefers the server's own explanation over the transport wording
pub(crate) fn explain(error: ClientError) -> anyhow::Error {
    if let Some(message) = error.server_message().filter(|message| !message.is_empty()) {
        return anyhow::anyhow!("{}", message);
    }
    error.into()
}

/// Print a status snapshot
fn print_status_details(snapshot: &StatusSnapshot) {
    println!("{}", "Job Status:".bold());
    println!("  State:      {}", colorize_state(snapshot.active));
    println!("  Message:    {}", snapshot.status_message);
    println!(
        "  Links:      {} ({} collected)",
        format_percent(snapshot.link_collection_progress).cyan(),
        snapshot.link_count
    );
    println!(
        "  Details:    {} ({}/{} scraped)",
        format_percent(snapshot.detail_scraping_progress).cyan(),
        snapshot.scraped_count,
        snapshot.total_to_scrape
    );

    if snapshot.has_results() {
        println!(
            "  {}",
            "Results available: `scrapewatch results` or `scrapewatch download`".dimmed()
        );
    }
}

/// Colorize the running state for display
fn colorize_state(active: bool) -> ColoredString {
    if active {
        "Running".green()
    } else {
        "Idle".dimmed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_prefers_server_message() {
        let error = explain(ClientError::api_error(400, "Scraping is already in progress."));
        assert_eq!(error.to_string(), "Scraping is already in progress.");
    }

    #[test]
    fn test_explain_keeps_transport_error() {
        let error = explain(ClientError::Timeout("no answer".to_string()));
        assert!(error.to_string().contains("timed out"));
    }
}
