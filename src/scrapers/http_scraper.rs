use async_trait::async_trait;
use reqwest::{header, Client, ClientBuilder};
use std::sync::Arc;

use super::Scraper;
use crate::core::config::ScraperConfig;
use crate::core::retry::RetryConfig;
use crate::http::{HttpRequest, HttpResponse};
use crate::{ScraperError, ScraperResult, StatsTracker};

#[derive(Clone)]
pub struct HttpScraper {
    client: Client,
    retry_config: RetryConfig,
    stats: Arc<StatsTracker>,
}

impl HttpScraper {
    pub fn with_config(config: &ScraperConfig) -> ScraperResult<Self> {
        let mut header_map = header::HeaderMap::new();
        for (key, value) in &config.headers {
            let name = header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ScraperError::ClientError(e.to_string()))?;
            let value = header::HeaderValue::from_str(value)
                .map_err(|e| ScraperError::ClientError(e.to_string()))?;
            header_map.insert(name, value);
        }

        let mut builder = ClientBuilder::new()
            .user_agent(config.user_agent.as_str())
            .default_headers(header_map);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            retry_config: config.retry_config.clone(),
            stats: Arc::new(StatsTracker::new()),
        })
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn fetch_single(&self, request: &HttpRequest) -> ScraperResult<HttpResponse> {
        let response = self.client.get(request.full_url()).send().await?;

        let status = response.status().as_u16();
        let url = response.url().clone();
        let body = response.text().await?;

        Ok(HttpResponse {
            url,
            status,
            body,
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (HttpScraper, MockServer) {
        let server = MockServer::start().await;
        let config = ScraperConfig::default().with_retry(RetryConfig::disabled());
        let scraper = HttpScraper::with_config(&config).unwrap();
        (scraper, server)
    }

    #[tokio::test]
    async fn test_get_request_with_query() {
        let (scraper, mock_server) = setup().await;

        Mock::given(method("GET"))
            .and(path("/room/index.php"))
            .and(query_param("date_set[year]", "2024"))
            .and(query_param("csrf", "abc123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html>ok</html>")
                    .insert_header("content-type", "text/html; charset=utf-8"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = Url::parse(&mock_server.uri())
            .unwrap()
            .join("/room/index.php")
            .unwrap();
        let request = HttpRequest::new(url)
            .with_query("date_set[year]", 2024)
            .with_query("csrf", "abc123");
        let response = scraper.fetch(&request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "<html>ok</html>");
        assert!(response.is_success());
        assert_eq!(scraper.stats().get_stats().successful_requests, 1);
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        let (scraper, mock_server) = setup().await;

        Mock::given(method("GET"))
            .and(path("/error"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&mock_server)
            .await;

        let url = Url::parse(&mock_server.uri())
            .unwrap()
            .join("/error")
            .unwrap();
        let response = scraper.fetch(&HttpRequest::new(url)).await.unwrap();

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
        assert_eq!(scraper.stats().get_stats().failed_requests, 1);
    }

    #[tokio::test]
    async fn test_custom_headers_and_user_agent() {
        let mock_server = MockServer::start().await;
        let config = ScraperConfig::default()
            .with_user_agent("CabinBot/1.0")
            .with_headers(vec![("accept-language", "zh-TW")]);
        let scraper = HttpScraper::with_config(&config).unwrap();

        Mock::given(method("GET"))
            .and(path("/"))
            .and(header("user-agent", "CabinBot/1.0"))
            .and(header("accept-language", "zh-TW"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&mock_server)
            .await;

        let url = Url::parse(&mock_server.uri()).unwrap();
        let response = scraper.fetch(&HttpRequest::new(url)).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "ok");
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_http_error() {
        let mock_server = MockServer::start().await;
        let config = ScraperConfig::default()
            .with_timeout(Some(Duration::from_millis(100)))
            .with_retry(RetryConfig::disabled());
        let scraper = HttpScraper::with_config(&config).unwrap();

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let url = Url::parse(&mock_server.uri()).unwrap();
        let result = scraper.fetch(&HttpRequest::new(url)).await;

        assert!(matches!(result, Err(ScraperError::HttpError(_))));
        assert_eq!(scraper.stats().get_stats().transport_failures, 1);
    }

    #[test]
    fn test_invalid_headers() {
        let config = ScraperConfig::default().with_headers(vec![("invalid\0header", "value")]);
        let result = HttpScraper::with_config(&config);
        assert!(matches!(result, Err(ScraperError::ClientError(_))));
    }
}
