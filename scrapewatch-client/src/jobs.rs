//! Job control API endpoints

use tracing::debug;

use crate::ScraperClient;
use crate::error::{ClientError, Result};
use scrapewatch_core::{ApiReply, JobConfig, ResultRecord, StatusSnapshot};

impl ScraperClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Ask the server to start a scraping run
    ///
    /// A run already in progress or an invalid configuration comes back as
    /// [`ClientError::ApiError`] carrying the server's message.
    ///
    /// # Example
    /// ```no_run
    /// # use scrapewatch_client::ScraperClient;
    /// # use scrapewatch_core::JobConfig;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ScraperClient::new("http://localhost:5000");
    /// let reply = client
    ///     .start_job(&JobConfig::new("plumbers", vec!["10001".to_string()]))
    ///     .await?;
    /// println!("{}", reply.message);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn start_job(&self, config: &JobConfig) -> Result<ApiReply> {
        let url = self.url("/start-scraping");
        debug!(
            "Starting job for {:?} across {} zipcode(s)",
            config.search_term,
            config.zipcodes.len()
        );
        let response = self
            .client
            .post(&url)
            .json(config)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        self.handle_response(response).await
    }

    /// Send the stop signal
    ///
    /// The server answers 200 both when a run was signalled and when none
    /// was active; inspect [`ApiReply::is_success`] to tell them apart.
    pub async fn stop_job(&self) -> Result<ApiReply> {
        let url = self.url("/stop-scraping");
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Observation
    // =============================================================================

    /// Get the current job status
    pub async fn status(&self) -> Result<StatusSnapshot> {
        let url = self.url("/status");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        self.handle_response(response).await
    }

    /// Get every result row scraped so far, in server order
    pub async fn results(&self) -> Result<Vec<ResultRecord>> {
        let url = self.url("/get-results");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        self.handle_response(response).await
    }

    /// Download the CSV export of the current results
    ///
    /// Returns [`ClientError::NotFound`] when there is nothing to export.
    pub async fn download_csv(&self) -> Result<bytes::Bytes> {
        let url = self.url("/download-csv");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        self.handle_bytes_response(response).await
    }
}
