//! Result fetcher
//!
//! Refreshes the full result set on its own cadence, independent of the job
//! lifecycle. Fetching is idempotent, so it also runs before the first job
//! and after the last one.

use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::event::Event;
use scrapewatch_client::JobService;

/// Repeating result fetch
pub struct ResultFetcher {
    service: Arc<dyn JobService>,
    interval: Duration,
    events: UnboundedSender<Event>,
    handle: Option<JoinHandle<()>>,
}

impl ResultFetcher {
    /// Creates a stopped fetcher
    pub fn new(
        service: Arc<dyn JobService>,
        interval: Duration,
        events: UnboundedSender<Event>,
    ) -> Self {
        Self {
            service,
            interval,
            events,
            handle: None,
        }
    }

    /// Starts fetching immediately and then every interval
    ///
    /// Restarting cancels the previous repetition. Failed fetches are
    /// reported and the cadence continues.
    pub fn start(&mut self) {
        self.stop();

        info!("Starting result fetcher (interval: {:?})", self.interval);

        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        let period = self.interval;

        self.handle = Some(tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let outcome = service.results().await;
                match &outcome {
                    Ok(records) => debug!("Fetched {} result row(s)", records.len()),
                    Err(e) => warn!("Result fetch failed: {}", e),
                }

                if events.send(Event::Results(outcome)).is_err() {
                    break;
                }
            }
        }));
    }

    /// Cancels the repetition; a no-op when already stopped
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Stopped result fetcher");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ResultFetcher {
    fn drop(&mut self) {
        self.stop();
    }
}
