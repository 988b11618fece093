//! Status poller
//!
//! Queries job status on a fixed interval and forwards each outcome to the
//! controller. Holds no job-state knowledge of its own.

use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::event::Event;
use scrapewatch_client::JobService;

/// Repeating status query with at most one live repetition
pub struct Poller {
    service: Arc<dyn JobService>,
    interval: Duration,
    events: UnboundedSender<Event>,
    handle: Option<JoinHandle<()>>,
    /// Generation of the live repetition, `None` once stopped
    live: Option<u64>,
    next_generation: u64,
}

impl Poller {
    /// Creates a stopped poller
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
            live: None,
            next_generation: 1,
        }
    }

    /// Starts polling, cancelling any repetition already running
    ///
    /// The first query happens one interval after the call.
    pub fn start(&mut self) {
        self.stop();

        let generation = self.next_generation;
        self.next_generation += 1;

        info!(
            "Starting status poller #{} (interval: {:?})",
            generation, self.interval
        );

        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        let period = self.interval;

        self.live = Some(generation);
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                debug!("Polling job status (poller #{})", generation);

                let outcome = service.status().await;
                let failed = outcome.is_err();
                if let Err(e) = &outcome {
                    error!("Status poll failed, stopping poller #{}: {}", generation, e);
                }

                if events.send(Event::Status { generation, outcome }).is_err() || failed {
                    break;
                }
            }
        }));
    }

    /// Cancels the repetition; a no-op when already stopped
    ///
    /// A request already in flight is dropped at its await point.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Stopped status poller #{}", self.live.unwrap_or_default());
        }
        self.live = None;
    }

    /// Whether a repetition is scheduled and has not ended by itself
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Generation of the live repetition, if any
    pub fn generation(&self) -> Option<u64> {
        self.live
    }

    /// Whether an event from `generation` belongs to the live repetition
    pub fn is_current(&self, generation: u64) -> bool {
        self.live == Some(generation)
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
