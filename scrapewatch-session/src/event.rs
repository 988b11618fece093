//! Messages from the background timers to the controller

use scrapewatch_client::Result;
use scrapewatch_core::{ResultRecord, StatusSnapshot};

/// Outcome of one timer tick
#[derive(Debug)]
pub enum Event {
    /// A status poll finished
    ///
    /// `generation` identifies the poller repetition that issued it; the
    /// controller drops results from repetitions that have since been
    /// cancelled.
    Status {
        generation: u64,
        outcome: Result<StatusSnapshot>,
    },

    /// A result fetch finished
    Results(Result<Vec<ResultRecord>>),
}
