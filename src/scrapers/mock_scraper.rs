use crate::core::retry::RetryConfig;
use crate::http::{HttpRequest, HttpResponse};
use crate::{ScraperError, ScraperResult, StatsTracker};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::Scraper;

#[derive(Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Replays canned responses in order, wrapping around at the end, and keeps a
/// log of every request it was handed.
#[derive(Clone)]
pub struct MockScraper {
    retry_config: RetryConfig,
    responses: Arc<Vec<MockResponse>>,
    current_response: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    stats: Arc<StatsTracker>,
}

impl MockScraper {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self::with_retry(RetryConfig::disabled(), responses)
    }

    pub fn with_retry(retry_config: RetryConfig, responses: Vec<MockResponse>) -> Self {
        Self {
            retry_config,
            responses: Arc::new(responses),
            current_response: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            stats: Arc::new(StatsTracker::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn fetch_single(&self, request: &HttpRequest) -> ScraperResult<HttpResponse> {
        self.requests.lock().push(request.clone());

        if self.responses.is_empty() {
            return Err(ScraperError::ClientError(
                "mock scraper has no responses".to_string(),
            ));
        }
        let index = self.current_response.fetch_add(1, Ordering::SeqCst);
        let response = &self.responses[index % self.responses.len()];

        Ok(HttpResponse {
            url: request.full_url(),
            status: response.status,
            body: response.body.clone(),
            retry_count: 0,
        })
    }

    fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}
