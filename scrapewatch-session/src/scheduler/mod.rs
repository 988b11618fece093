//! Scheduler layer for the session
//!
//! The two background timers. Each owns its task handle privately and
//! exposes only start/stop; both report to the controller through
//! [`Event`](crate::event::Event) messages.

pub mod fetcher;
pub mod poller;

pub use fetcher::ResultFetcher;
pub use poller::Poller;
