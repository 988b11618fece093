//! Configuration module
//!
//! Resolves the session settings for a CLI invocation: the server URL from
//! the command line, timer cadence and request timeout from the environment.

use anyhow::{Context, Result};
use scrapewatch_client::ScraperClient;
use scrapewatch_session::SessionConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub session: SessionConfig,
}

impl Config {
    /// Loads the environment settings and applies the `--server-url` override
    pub fn load(server_url: String) -> Result<Self> {
        let mut session = SessionConfig::from_env().context("Failed to read session settings")?;
        session.server_url = server_url;
        session.validate().context("Invalid session settings")?;
        Ok(Self { session })
    }

    /// Builds an HTTP client honoring the configured request timeout
    pub fn client(&self) -> Result<ScraperClient> {
        ScraperClient::with_timeout(&self.session.server_url, self.session.request_timeout)
            .context("Failed to build HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_uses_server_url() {
        let config = Config {
            session: SessionConfig {
                request_timeout: Duration::from_secs(5),
                ..SessionConfig::new("http://scraper.local:5000/")
            },
        };

        let client = config.client().unwrap();
        assert_eq!(client.base_url(), "http://scraper.local:5000");
    }
}
