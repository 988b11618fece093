#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use scrapewatch_client::{ClientError, JobService, Result};
use scrapewatch_core::{ApiReply, JobConfig, RawForm, ResultRecord, StatusSnapshot};

/// Scripted in-memory stand-in for the scraper server
///
/// Queued replies are served in order. Once the status queue runs dry the
/// last successful snapshot is repeated; an empty start or stop queue
/// answers with success.
#[derive(Default)]
pub struct FakeService {
    start_replies: Mutex<VecDeque<Result<ApiReply>>>,
    stop_replies: Mutex<VecDeque<Result<ApiReply>>>,
    statuses: Mutex<VecDeque<Result<StatusSnapshot>>>,
    last_status: Mutex<StatusSnapshot>,
    results: Mutex<Vec<ResultRecord>>,
    failing_results: Mutex<usize>,
    submitted: Mutex<Vec<JobConfig>>,
    start_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    status_calls: AtomicUsize,
    results_calls: AtomicUsize,
}

impl FakeService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_start(&self, reply: Result<ApiReply>) {
        self.start_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_stop(&self, reply: Result<ApiReply>) {
        self.stop_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_status(&self, status: Result<StatusSnapshot>) {
        self.statuses.lock().unwrap().push_back(status);
    }

    pub fn set_results(&self, records: Vec<ResultRecord>) {
        *self.results.lock().unwrap() = records;
    }

    /// Makes the next `count` result fetches fail
    pub fn fail_results(&self, count: usize) {
        *self.failing_results.lock().unwrap() = count;
    }

    pub fn submitted(&self) -> Vec<JobConfig> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn results_calls(&self) -> usize {
        self.results_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobService for FakeService {
    async fn start_job(&self, config: &JobConfig) -> Result<ApiReply> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(config.clone());
        self.start_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(reply("success", "Scraping process started.")))
    }

    async fn stop_job(&self) -> Result<ApiReply> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.stop_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(reply("success", "Stop signal sent.")))
    }

    async fn status(&self) -> Result<StatusSnapshot> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        match self.statuses.lock().unwrap().pop_front() {
            Some(Ok(snapshot)) => {
                *self.last_status.lock().unwrap() = snapshot.clone();
                Ok(snapshot)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self.last_status.lock().unwrap().clone()),
        }
    }

    async fn results(&self) -> Result<Vec<ResultRecord>> {
        self.results_calls.fetch_add(1, Ordering::SeqCst);
        let mut failing = self.failing_results.lock().unwrap();
        if *failing > 0 {
            *failing -= 1;
            return Err(ClientError::Timeout("results timed out".to_string()));
        }
        Ok(self.results.lock().unwrap().clone())
    }
}

pub fn reply(status: &str, message: &str) -> ApiReply {
    ApiReply {
        status: Some(status.to_string()),
        message: message.to_string(),
    }
}

pub fn running(link_progress: f64, detail_progress: f64) -> StatusSnapshot {
    StatusSnapshot {
        status_message: "Stage 1/2: Collecting Google Maps URLs...".to_string(),
        link_collection_progress: link_progress,
        detail_scraping_progress: detail_progress,
        active: true,
        ..Default::default()
    }
}

pub fn finished(scraped_count: u64) -> StatusSnapshot {
    StatusSnapshot {
        status_message: "Scraping complete! View and download results.".to_string(),
        link_collection_progress: 1.0,
        detail_scraping_progress: 1.0,
        link_count: scraped_count,
        scraped_count,
        total_to_scrape: scraped_count,
        active: false,
        result_count_hint: None,
    }
}

pub fn record(name: &str) -> ResultRecord {
    ResultRecord {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

pub fn plumbers_form() -> RawForm {
    RawForm {
        search_term: "plumbers".to_string(),
        categories: "A, B".to_string(),
        zipcodes: "10001\n10002".to_string(),
        ..Default::default()
    }
}
