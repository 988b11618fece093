//! Scrapewatch Core
//!
//! Core types and pure logic for controlling a remote scraping job.
//!
//! This crate contains:
//! - Domain types: job configuration, status snapshots, result rows
//! - DTOs: wire-only request and reply shapes
//! - Form normalization: raw operator input to a validated configuration
//! - Reconciliation: snapshot plus prior lock state to render commands

pub mod domain;
pub mod dto;
pub mod error;
pub mod form;
pub mod reconcile;
pub mod ui;

pub use domain::job::{IndexRange, JobConfig};
pub use domain::record::ResultRecord;
pub use domain::status::StatusSnapshot;
pub use dto::job::ApiReply;
pub use error::ConfigError;
pub use form::RawForm;
pub use reconcile::{Reconciliation, format_percent, reconcile, render_results};
pub use ui::{ControlId, ElementId, RenderCommand, UiControlState};
