//! Scrapewatch Session
//!
//! Client-side lifecycle of a remote scraping job.
//!
//! Architecture:
//! - Configuration: server location and timer cadence
//! - Scheduler: the status poller and the result fetcher, each a private
//!   background task reporting through [`Event`] messages
//! - Controller: owns the lock state, the timers and the render surface;
//!   turns operator actions into server calls and timer events into
//!   render commands via the core reconciler
//! - Render: the [`RenderSurface`] capability set the controller draws on
//!
//! The controller never drives the job itself: it only requests start and
//! stop and believes whatever the status endpoint reports.

pub mod config;
pub mod controller;
pub mod event;
pub mod render;
pub mod scheduler;

pub use config::SessionConfig;
pub use controller::{Accepted, JobController, Rejected};
pub use event::Event;
pub use render::{RecordingSurface, RenderSurface};
pub use scheduler::{Poller, ResultFetcher};
