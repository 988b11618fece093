//! Session configuration
//!
//! Server location and the cadence of the two background timers. Defaults
//! match the web dashboard: status every 2 seconds, results every 10.

use std::time::Duration;

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Scraper server base URL (e.g., "http://localhost:5000")
    pub server_url: String,

    /// How often to poll job status while a job runs
    pub poll_interval: Duration,

    /// How often to refresh the result table
    pub results_interval: Duration,

    /// Maximum time a single request may take
    pub request_timeout: Duration,
}

impl SessionConfig {
    pub const DEFAULT_SERVER_URL: &'static str = "http://localhost:5000";
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
    pub const DEFAULT_RESULTS_INTERVAL: Duration = Duration::from_secs(10);
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a configuration with default intervals
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            results_interval: Self::DEFAULT_RESULTS_INTERVAL,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - SCRAPEWATCH_SERVER_URL (optional, default: http://localhost:5000)
    /// - SCRAPEWATCH_POLL_INTERVAL (optional, seconds, default: 2)
    /// - SCRAPEWATCH_RESULTS_INTERVAL (optional, seconds, default: 10)
    /// - SCRAPEWATCH_REQUEST_TIMEOUT (optional, seconds, default: 30)
    pub fn from_env() -> anyhow::Result<Self> {
        let server_url = std::env::var("SCRAPEWATCH_SERVER_URL")
            .unwrap_or_else(|_| Self::DEFAULT_SERVER_URL.to_string());

        Ok(Self {
            server_url,
            poll_interval: seconds_from_env(
                "SCRAPEWATCH_POLL_INTERVAL",
                Self::DEFAULT_POLL_INTERVAL,
            )?,
            results_interval: seconds_from_env(
                "SCRAPEWATCH_RESULTS_INTERVAL",
                Self::DEFAULT_RESULTS_INTERVAL,
            )?,
            request_timeout: seconds_from_env(
                "SCRAPEWATCH_REQUEST_TIMEOUT",
                Self::DEFAULT_REQUEST_TIMEOUT,
            )?,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server_url.is_empty() {
            anyhow::bail!("server_url cannot be empty");
        }

        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            anyhow::bail!("server_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.results_interval.is_zero() {
            anyhow::bail!("results_interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SERVER_URL)
    }
}

fn seconds_from_env(key: &str, default: Duration) -> anyhow::Result<Duration> {
    match std::env::var(key) {
        Ok(raw) => {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("{} must be a whole number of seconds, got {:?}", key, raw))?;
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(default),
    }
}
