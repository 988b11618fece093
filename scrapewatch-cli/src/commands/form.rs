//! Start form arguments
//!
//! Every field is taken as raw text and handed to the same normalization
//! the session controller applies, so blank values fall back to the server
//! defaults and malformed values are reported before anything is sent.

use clap::Args;
use scrapewatch_core::RawForm;

/// Job parameters shared by `start` and `watch`
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// What to search for on Google Maps (e.g. "plumbers")
    #[arg(short, long)]
    pub search_term: String,

    /// Zipcodes to search, separated by commas, semicolons or newlines
    #[arg(short, long)]
    pub zipcodes: String,

    /// Only keep businesses in these categories
    #[arg(short, long)]
    pub categories: Option<String>,

    /// Concurrent browser workers
    #[arg(long)]
    pub max_workers: Option<String>,

    /// Result list scrolls per zipcode
    #[arg(long)]
    pub max_scrolls: Option<String>,

    /// Seconds to wait after each scroll
    #[arg(long)]
    pub scroll_pause: Option<String>,

    /// Seconds before a detail page is abandoned
    #[arg(long)]
    pub scrape_timeout: Option<String>,

    /// Run the browser headless (true/false)
    #[arg(long)]
    pub headless: Option<String>,

    /// Maximum businesses per zipcode, 0 for no limit
    #[arg(long)]
    pub per_zip_limit: Option<String>,

    /// Which collected links to scrape, e.g. "1-20, 30-40"
    #[arg(long)]
    pub index_ranges: Option<String>,

    /// Drop duplicate links across zipcodes (true/false)
    #[arg(long)]
    pub dedupe_links: Option<String>,
}

impl FormArgs {
    pub fn into_form(self) -> RawForm {
        RawForm {
            search_term: self.search_term,
            categories: self.categories.unwrap_or_default(),
            zipcodes: self.zipcodes,
            max_workers: self.max_workers.unwrap_or_default(),
            max_scrolls: self.max_scrolls.unwrap_or_default(),
            scroll_pause: self.scroll_pause.unwrap_or_default(),
            scrape_timeout: self.scrape_timeout.unwrap_or_default(),
            headless_mode: self.headless.unwrap_or_default(),
            per_zip_limit: self.per_zip_limit.unwrap_or_default(),
            index_ranges: self.index_ranges.unwrap_or_default(),
            dedupe_links: self.dedupe_links.unwrap_or_default(),
        }
    }
}
