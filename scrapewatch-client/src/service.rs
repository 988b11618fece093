//! Remote job service abstraction
//!
//! The session controller only needs four calls from the server. Keeping
//! them behind a trait lets the controller run against an in-memory fake.

use async_trait::async_trait;
use scrapewatch_core::{ApiReply, JobConfig, ResultRecord, StatusSnapshot};

use crate::ScraperClient;
use crate::error::Result;

/// The remote side of a scraping job
#[async_trait]
pub trait JobService: Send + Sync {
    /// Submits a configuration and asks for a run to start
    async fn start_job(&self, config: &JobConfig) -> Result<ApiReply>;

    /// Signals a running job to stop; halting is confirmed later by polling
    async fn stop_job(&self) -> Result<ApiReply>;

    /// Reads the current status snapshot
    async fn status(&self) -> Result<StatusSnapshot>;

    /// Reads the full current result set
    async fn results(&self) -> Result<Vec<ResultRecord>>;
}

#[async_trait]
impl JobService for ScraperClient {
    async fn start_job(&self, config: &JobConfig) -> Result<ApiReply> {
        ScraperClient::start_job(self, config).await
    }

    async fn stop_job(&self) -> Result<ApiReply> {
        ScraperClient::stop_job(self).await
    }

    async fn status(&self) -> Result<StatusSnapshot> {
        ScraperClient::status(self).await
    }

    async fn results(&self) -> Result<Vec<ResultRecord>> {
        ScraperClient::results(self).await
    }
}
