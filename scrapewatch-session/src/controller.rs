//! Job controller
//!
//! Single owner of the session's mutable state: the render surface, the lock
//! flag and both timers. Operator actions and timer events are applied one
//! at a time, so every surface mutation is serialized even though their
//! arrival order is not.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::event::Event;
use crate::render::{self, RenderSurface};
use crate::scheduler::{Poller, ResultFetcher};
use scrapewatch_client::{ClientError, JobService};
use scrapewatch_core::{
    ConfigError, ControlId, ElementId, RawForm, RenderCommand, ResultRecord, StatusSnapshot,
    UiControlState, reconcile, render_results,
};

const STARTING: &str = "Starting scraping job...";
const START_UNREACHABLE: &str = "Could not reach the scraping server. The job was not started.";
const START_DECLINED: &str = "The server declined to start the job.";
const STOP_SENT: &str = "Stop signal sent.";
const STOP_FAILED: &str = "Failed to send the stop signal.";
const POLL_FAILED: &str = "Lost connection to the scraping server. Status updates stopped.";
const RESULTS_FAILED: &str = "Could not refresh results from the scraping server.";

/// A start the server accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub message: String,
}

/// Why a start did not happen
#[derive(Debug, Error)]
pub enum Rejected {
    /// A job is presumed running; the start control is disabled
    #[error("a scraping job is already running")]
    Locked,

    /// The form failed validation; nothing was sent
    #[error("invalid job configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The server answered and refused
    #[error("server declined to start the job: {0}")]
    Server(String),

    /// The server could not be reached
    #[error("could not reach the scraping server: {0}")]
    Transport(#[source] ClientError),
}

/// Drives one operator session against the remote job
pub struct JobController<S: RenderSurface> {
    service: Arc<dyn JobService>,
    surface: S,
    poller: Poller,
    fetcher: ResultFetcher,
    events: UnboundedReceiver<Event>,
    /// Whether a job is presumed running (start control disabled)
    locked: bool,
    /// Last status message rendered
    shown_status: String,
    /// Status message hidden by a result fetch failure, restored on recovery
    status_under_failure: Option<String>,
}

impl<S: RenderSurface> JobController<S> {
    /// Creates an idle controller and renders the initial control state
    ///
    /// Neither timer runs yet; call [`watch_results`](Self::watch_results)
    /// to begin refreshing the result table.
    pub fn new(service: Arc<dyn JobService>, surface: S, config: &SessionConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let poller = Poller::new(Arc::clone(&service), config.poll_interval, tx.clone());
        let fetcher = ResultFetcher::new(Arc::clone(&service), config.results_interval, tx);

        let mut controller = Self {
            service,
            surface,
            poller,
            fetcher,
            events: rx,
            locked: false,
            shown_status: String::new(),
            status_under_failure: None,
        };
        controller.render(&UiControlState::derive(false, false).commands());
        controller
    }

    /// Starts the independent result refresh
    pub fn watch_results(&mut self) {
        self.fetcher.start();
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    pub fn is_watching_results(&self) -> bool {
        self.fetcher.is_running()
    }

    /// Generation of the live status poller, if any
    pub fn poll_generation(&self) -> Option<u64> {
        self.poller.generation()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // =============================================================================
    // Operator actions
    // =============================================================================

    /// Validates the form and asks the server to start a job
    ///
    /// The start control is disabled before the request goes out, so a
    /// second start cannot be issued while the first is in flight. Any
    /// failure rolls the controls back to a re-startable state.
    pub async fn submit_start(&mut self, form: &RawForm) -> Result<Accepted, Rejected> {
        if self.locked {
            warn!("Start ignored: a job is already running");
            return Err(Rejected::Locked);
        }

        let config = match form.parse() {
            Ok(config) => config,
            Err(e) => {
                warn!("Rejected job configuration: {}", e);
                self.render(&[RenderCommand::text(ElementId::StatusMessage, e.to_string())]);
                return Err(e.into());
            }
        };

        self.locked = true;
        self.render(&[
            RenderCommand::enable(ControlId::Start, false),
            RenderCommand::text(ElementId::StatusMessage, STARTING),
        ]);

        info!(
            "Submitting job {:?} for {} zipcode(s), {} category filter(s)",
            config.search_term,
            config.zipcodes.len(),
            config.categories.len()
        );

        match self.service.start_job(&config).await {
            Ok(reply) if reply.is_success() => {
                info!("Job accepted: {}", reply.message);
                let message = non_empty(reply.message, STARTING);
                self.render(&[
                    RenderCommand::enable(ControlId::Stop, true),
                    RenderCommand::enable(ControlId::Download, false),
                    RenderCommand::ClearRows,
                    RenderCommand::text(ElementId::StatusMessage, message.as_str()),
                ]);
                self.poller.start();
                Ok(Accepted { message })
            }
            Ok(reply) => {
                let message = non_empty(reply.message, START_DECLINED);
                warn!("Job declined: {}", message);
                self.unlock(&message);
                Err(Rejected::Server(message))
            }
            Err(e) => match e.server_message().map(ToOwned::to_owned) {
                Some(message) if !e.is_transport() => {
                    let message = non_empty(message, START_DECLINED);
                    warn!("Job declined: {}", message);
                    self.unlock(&message);
                    Err(Rejected::Server(message))
                }
                _ => {
                    warn!("Start request failed: {}", e);
                    self.unlock(START_UNREACHABLE);
                    Err(Rejected::Transport(e))
                }
            },
        }
    }

    /// Sends the stop signal
    ///
    /// The stop control is disabled whatever the outcome. The lock is left
    /// to the reconciler, which releases it once polling sees the job halt.
    pub async fn submit_stop(&mut self) {
        info!("Sending stop signal");

        let message = match self.service.stop_job().await {
            Ok(reply) => non_empty(reply.message, STOP_SENT),
            Err(e) => {
                warn!("Stop request failed: {}", e);
                match e.server_message() {
                    Some(message) if !message.is_empty() => message.to_string(),
                    _ => STOP_FAILED.to_string(),
                }
            }
        };

        self.render(&[
            RenderCommand::enable(ControlId::Stop, false),
            RenderCommand::text(ElementId::StatusMessage, message),
        ]);
    }

    // =============================================================================
    // Timer events
    // =============================================================================

    /// Waits for the next timer event
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events.recv().await
    }

    /// Applies one timer event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Status { generation, .. } if !self.poller.is_current(generation) => {
                debug!("Discarding status from cancelled poller #{}", generation);
            }
            Event::Status {
                outcome: Ok(snapshot),
                ..
            } => self.apply_snapshot(&snapshot),
            Event::Status {
                outcome: Err(e), ..
            } => self.apply_poll_failure(&e),
            Event::Results(Ok(records)) => self.apply_results(&records),
            Event::Results(Err(e)) => self.apply_results_failure(&e),
        }
    }

    /// Fetches the result set once, outside the fetcher's cadence
    ///
    /// The server fills its result table just before it reports the job
    /// inactive, so a caller leaving after the end edge refreshes once to
    /// show the final rows.
    pub async fn refresh_results(&mut self) {
        let outcome = self.service.results().await;
        self.handle_event(Event::Results(outcome));
    }

    /// Stops both timers
    pub fn shutdown(&mut self) {
        self.poller.stop();
        self.fetcher.stop();
    }

    fn apply_snapshot(&mut self, snapshot: &StatusSnapshot) {
        let outcome = reconcile(self.locked, snapshot);
        self.locked = outcome.locked;

        if outcome.job_ended {
            info!(
                "Job finished: {} ({}/{} scraped)",
                snapshot.status_message, snapshot.scraped_count, snapshot.total_to_scrape
            );
            self.poller.stop();
        }

        self.render(&outcome.commands);
    }

    fn apply_poll_failure(&mut self, error: &ClientError) {
        warn!("Status polling stopped after failure: {}", error);
        self.poller.stop();

        if self.locked {
            self.unlock(POLL_FAILED);
        } else {
            self.render(&[RenderCommand::text(ElementId::StatusMessage, POLL_FAILED)]);
        }
    }

    fn apply_results(&mut self, records: &[ResultRecord]) {
        if let Some(previous) = self.status_under_failure.take() {
            if self.shown_status == RESULTS_FAILED {
                self.render(&[RenderCommand::text(ElementId::StatusMessage, previous)]);
            }
        }
        self.render(&render_results(records));
    }

    /// Reports the first of a run of failed fetches
    fn apply_results_failure(&mut self, error: &ClientError) {
        debug!("Result refresh failed: {}", error);
        if self.status_under_failure.is_some() {
            return;
        }
        self.status_under_failure = Some(self.shown_status.clone());
        self.render(&[RenderCommand::text(ElementId::StatusMessage, RESULTS_FAILED)]);
    }

    /// Returns controls to the idle state with a status message
    fn unlock(&mut self, message: &str) {
        self.locked = false;
        self.render(&[
            RenderCommand::enable(ControlId::Start, true),
            RenderCommand::enable(ControlId::Stop, false),
            RenderCommand::text(ElementId::StatusMessage, message),
        ]);
    }

    fn render(&mut self, commands: &[RenderCommand]) {
        for command in commands {
            if let RenderCommand::SetText {
                element: ElementId::StatusMessage,
                text,
            } = command
            {
                self.shown_status.clone_from(text);
            }
        }
        render::apply(&mut self.surface, commands);
    }
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
