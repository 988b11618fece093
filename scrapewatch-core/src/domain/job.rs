//! Job configuration domain types

use serde::{Serialize, Serializer};
use std::fmt;

/// Parameters for one scraping run
///
/// Built fresh from operator input on every start and sent to the server
/// exactly once. Field names follow the server's `/start-scraping` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobConfig {
    #[serde(rename = "general_search_term")]
    pub search_term: String,
    pub categories: Vec<String>,
    pub zipcodes: Vec<String>,
    pub max_workers: u32,
    pub max_scrolls: u32,
    /// Seconds between result-list scrolls
    pub scroll_pause: u32,
    /// Per-page timeout in seconds
    pub scrape_timeout: u32,
    pub headless_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_zip_limit: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub index_ranges: Vec<IndexRange>,
    pub dedupe_links: bool,
}

impl JobConfig {
    pub const DEFAULT_MAX_WORKERS: u32 = 3;
    pub const DEFAULT_MAX_SCROLLS: u32 = 8;
    pub const DEFAULT_SCROLL_PAUSE: u32 = 2;
    pub const DEFAULT_SCRAPE_TIMEOUT: u32 = 15;
    pub const DEFAULT_HEADLESS: bool = true;

    /// Creates a configuration with server defaults for every tuning knob
    pub fn new(search_term: impl Into<String>, zipcodes: Vec<String>) -> Self {
        Self {
            search_term: search_term.into(),
            categories: Vec::new(),
            zipcodes,
            max_workers: Self::DEFAULT_MAX_WORKERS,
            max_scrolls: Self::DEFAULT_MAX_SCROLLS,
            scroll_pause: Self::DEFAULT_SCROLL_PAUSE,
            scrape_timeout: Self::DEFAULT_SCRAPE_TIMEOUT,
            headless_mode: Self::DEFAULT_HEADLESS,
            per_zip_limit: None,
            index_ranges: Vec::new(),
            dedupe_links: false,
        }
    }
}

/// Inclusive, 1-based range of link positions to keep per zipcode
///
/// Serialized as `"start-end"`, the only list form the server accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    pub start: u32,
    pub end: u32,
}

impl IndexRange {
    /// Creates a range, swapping the bounds when given in reverse
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl Serialize for IndexRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
