//! Scrapewatch HTTP Client
//!
//! A small, type-safe HTTP client for the scraper server's job control API.
//!
//! Both the CLI one-shot commands and the session controller go through this
//! crate, the latter via the [`JobService`] trait so it can be driven by an
//! in-memory fake in tests.
//!
//! # Example
//!
//! ```no_run
//! use scrapewatch_client::ScraperClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ScraperClient::new("http://localhost:5000");
//!
//!     let status = client.status().await?;
//!     println!("{} (active: {})", status.status_message, status.active);
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
mod service;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use service::JobService;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::time::Duration;

/// HTTP client for the scraper server API
///
/// Endpoints:
/// - Job control (start, stop)
/// - Status polling
/// - Result retrieval and CSV export
#[derive(Debug, Clone)]
pub struct ScraperClient {
    /// Base URL of the server (e.g., "http://localhost:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ScraperClient {
    /// Create a new client with reqwest defaults
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the scraper server (e.g., "http://localhost:5000")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client whose requests give up after `timeout`
    ///
    /// # Example
    /// ```
    /// use scrapewatch_client::ScraperClient;
    /// use std::time::Duration;
    ///
    /// let client = ScraperClient::with_timeout("http://localhost:5000", Duration::from_secs(30))?;
    /// # Ok::<(), scrapewatch_client::ClientError>(())
    /// ```
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success statuses become [`ClientError::ApiError`] (or
    /// [`ClientError::NotFound`] for 404), carrying the server's `message`
    /// field when the body is a JSON reply.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;
        let body = response.text().await.map_err(ClientError::from_transport)?;

        serde_json::from_str(&null_non_finite(&body))
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body is an opaque download
    async fn handle_bytes_response(&self, response: reqwest::Response) -> Result<bytes::Bytes> {
        let response = self.check_status(response).await?;

        response.bytes().await.map_err(ClientError::from_transport)
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = extract_message(&error_text).unwrap_or_else(|| {
            // tracebacks and HTML error pages are not for the operator
            if status.is_server_error() || error_text.trim_start().starts_with('<') {
                format!("Server error ({})", status)
            } else {
                error_text.trim().to_string()
            }
        });

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(message));
        }
        Err(ClientError::api_error(status.as_u16(), message))
    }
}

/// Pulls `message` out of a JSON error body
fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(ToOwned::to_owned))
}

/// Rewrites bare `NaN`, `Infinity` and `-Infinity` tokens to `null`
///
/// The server serializes data frames with Python's JSON encoder, which
/// emits these for empty or non-finite cells. Text inside strings is left
/// alone.
fn null_non_finite(body: &str) -> Cow<'_, str> {
    const TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

    if !TOKENS.iter().any(|token| body.contains(token)) {
        return Cow::Borrowed(body);
    }

    let mut out = String::with_capacity(body.len());
    let mut rest = body;
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = TOKENS.iter().find(|token| rest.starts_with(**token)) {
            out.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Cow::Owned(out)
}
