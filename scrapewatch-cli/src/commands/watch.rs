//! Watch command handler
//!
//! Runs a full session in the terminal: the job controller starts the job,
//! both timers feed it, and the terminal surface draws what it renders.
//! The first Ctrl-C sends the stop signal and keeps watching until the
//! server reports the job halted; a second Ctrl-C leaves immediately.

use anyhow::{Context, Result};
use colored::*;
use scrapewatch_core::{ControlId, RawForm};
use scrapewatch_session::JobController;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::results::save_csv;
use crate::config::Config;
use crate::terminal::TerminalSurface;

pub async fn watch(config: &Config, form: &RawForm, output: Option<&Path>) -> Result<()> {
    let client = Arc::new(config.client()?);
    let mut controller = JobController::new(
        client.clone(),
        TerminalSurface::stdout(),
        &config.session,
    );

    controller
        .submit_start(form)
        .await
        .context("Job was not started")?;
    controller.watch_results();

    println!("{}", "Press Ctrl-C to stop the job.".dimmed());

    let mut stop_sent = false;
    let mut job_ended = false;
    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                if stop_sent {
                    warn!("Second interrupt, leaving without waiting for the job to halt");
                    break;
                }
                controller.submit_stop().await;
                stop_sent = true;
                println!("{}", "Waiting for the job to halt (Ctrl-C again to quit)...".dimmed());
            }
            event = controller.next_event() => {
                let Some(event) = event else { break };
                controller.handle_event(event);
                if !controller.is_locked() {
                    info!("Job no longer running, ending watch");
                    job_ended = true;
                    break;
                }
            }
        }
    }

    if job_ended {
        // the final rows land just before the job reports inactive
        controller.refresh_results().await;
    }
    controller.shutdown();

    if let Some(path) = output {
        if controller.surface().is_enabled(ControlId::Download) {
            save_csv(&client, path).await?;
        } else {
            println!("{}", "No results to download.".yellow());
        }
    }

    Ok(())
}
