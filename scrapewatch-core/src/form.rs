//! Operator input normalization
//!
//! The start form arrives as raw text fields. [`RawForm::parse`] trims,
//! splits and validates them into a [`JobConfig`] before anything is sent,
//! so a malformed form never reaches the server.

use serde::{Deserialize, Serialize};

use crate::domain::job::{IndexRange, JobConfig};
use crate::error::ConfigError;

/// Start form exactly as the operator typed it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawForm {
    pub search_term: String,
    /// Comma, semicolon or newline separated
    pub categories: String,
    /// Comma, semicolon or newline separated
    pub zipcodes: String,
    pub max_workers: String,
    pub max_scrolls: String,
    pub scroll_pause: String,
    pub scrape_timeout: String,
    /// `"true"` / `"false"` literal
    pub headless_mode: String,
    pub per_zip_limit: String,
    /// e.g. `"1-20, 30-40"`
    pub index_ranges: String,
    pub dedupe_links: String,
}

impl RawForm {
    /// Normalizes the form into a job configuration
    ///
    /// Blank numeric and flag fields fall back to the server defaults.
    pub fn parse(&self) -> Result<JobConfig, ConfigError> {
        let search_term = self.search_term.trim();
        if search_term.is_empty() {
            return Err(ConfigError::MissingField("search term"));
        }

        let zipcodes = split_list(&self.zipcodes);
        if zipcodes.is_empty() {
            return Err(ConfigError::MissingField("zipcodes"));
        }

        let max_workers = parse_count("max workers", &self.max_workers, JobConfig::DEFAULT_MAX_WORKERS)?;
        let scrape_timeout = parse_count(
            "scrape timeout",
            &self.scrape_timeout,
            JobConfig::DEFAULT_SCRAPE_TIMEOUT,
        )?;

        Ok(JobConfig {
            search_term: search_term.to_string(),
            categories: split_list(&self.categories),
            zipcodes,
            max_workers: at_least("max workers", max_workers, 1)?,
            max_scrolls: parse_count("max scrolls", &self.max_scrolls, JobConfig::DEFAULT_MAX_SCROLLS)?,
            scroll_pause: parse_count(
                "scroll pause",
                &self.scroll_pause,
                JobConfig::DEFAULT_SCROLL_PAUSE,
            )?,
            scrape_timeout: at_least("scrape timeout", scrape_timeout, 1)?,
            headless_mode: parse_flag("headless mode", &self.headless_mode, JobConfig::DEFAULT_HEADLESS)?,
            // zero means "no limit", same as leaving it blank
            per_zip_limit: Some(parse_count("per-zip limit", &self.per_zip_limit, 0)?)
                .filter(|limit| *limit > 0),
            index_ranges: parse_index_ranges(&self.index_ranges)?,
            dedupe_links: parse_flag("dedupe links", &self.dedupe_links, false)?,
        })
    }
}

/// Splits a comma, semicolon or newline separated list, dropping blanks
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split([',', ';', '\n', '\r'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Parses `"1-20, 30-40, 55"` into inclusive ranges
pub fn parse_index_ranges(raw: &str) -> Result<Vec<IndexRange>, ConfigError> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let invalid = || ConfigError::InvalidRange(part.to_string());
            match part.split_once('-') {
                Some((a, b)) => {
                    let a = a.trim().parse::<u32>().map_err(|_| invalid())?;
                    let b = b.trim().parse::<u32>().map_err(|_| invalid())?;
                    Ok(IndexRange::new(a, b))
                }
                None => {
                    let n = part.parse::<u32>().map_err(|_| invalid())?;
                    Ok(IndexRange::new(n, n))
                }
            }
        })
        .collect()
}

fn parse_count(field: &'static str, raw: &str, default: u32) -> Result<u32, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse::<u32>().map_err(|_| ConfigError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

fn at_least(field: &'static str, value: u32, min: u32) -> Result<u32, ConfigError> {
    if value < min {
        return Err(ConfigError::OutOfRange { field, min, value });
    }
    Ok(value)
}

fn parse_flag(field: &'static str, raw: &str, default: bool) -> Result<bool, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    match raw.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            field,
            value: raw.to_string(),
        }),
    }
}
