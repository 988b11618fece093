//! Core domain types
//!
//! The entities exchanged with the scraping server: the configuration sent
//! on start, the status snapshots returned by polling and the scraped
//! result rows.

pub mod job;
pub mod record;
pub mod status;
