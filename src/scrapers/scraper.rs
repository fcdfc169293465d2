use crate::core::retry::RetryConfig;
use crate::http::{HttpRequest, HttpResponse};
use crate::{ScraperResult, StatsTracker};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, trace, warn};
use std::sync::Arc;
use tokio::time::sleep;

#[async_trait]
pub trait Scraper: Send + Sync {
    async fn fetch_single(&self, request: &HttpRequest) -> ScraperResult<HttpResponse>;
    fn retry_config(&self) -> &RetryConfig;
    fn stats(&self) -> &StatsTracker;
    fn set_stats(&mut self, stats: Arc<StatsTracker>);

    async fn fetch(&self, request: &HttpRequest) -> ScraperResult<HttpResponse> {
        let mut retry_count = 0;

        loop {
            info!("Fetching URL: {}", request.url);
            let start_time = Utc::now();
            let response = match self.fetch_single(request).await {
                Ok(response) => response,
                Err(e) => {
                    self.stats().record_transport_failure();
                    return Err(e);
                }
            };
            let duration = Utc::now().signed_duration_since(start_time);
            self.stats()
                .record_request(response.status, response.body.len(), duration);
            debug!(
                "Received response: status={}, body_length={}",
                response.status,
                response.body.len()
            );

            if self
                .retry_config()
                .should_retry(response.status, retry_count)
            {
                let delay = self.retry_config().calculate_delay(retry_count);
                retry_count += 1;
                self.stats().record_retry();

                warn!(
                    "Retry triggered for URL: {} (status={}, attempt={}/{}, delay={:?})",
                    request.url,
                    response.status,
                    retry_count,
                    self.retry_config().max_retries,
                    delay
                );

                sleep(delay).await;
                continue;
            }

            info!(
                "Request completed for URL: {} (retries={}, status={})",
                request.url, retry_count, response.status
            );
            trace!("Response content length: {} bytes", response.body.len());

            return Ok(HttpResponse {
                retry_count,
                ..response
            });
        }
    }
}
