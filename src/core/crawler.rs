use crate::core::store::ResultStore;
use crate::http::HttpRequest;
use crate::parser::{extract_token, select_day_cells};
use crate::sites::SiteConfig;
use crate::stats::StatsTracker;
use crate::{Scraper, ScraperError, ScraperResult};
use log::{debug, error, info, warn};
use scraper::Html;
use std::sync::Arc;

/// Runs the token and month requests for a site and turns month pages into
/// a [`ResultStore`].
pub struct Crawler {
    scraper: Box<dyn Scraper>,
    stats: Arc<StatsTracker>,
}

impl Crawler {
    pub fn new(scraper: Box<dyn Scraper>) -> Self {
        let stats = Arc::new(StatsTracker::new());
        let mut scraper = scraper;
        scraper.set_stats(Arc::clone(&stats));

        Self { scraper, stats }
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    pub async fn fetch_token(&self, site: &SiteConfig) -> ScraperResult<String> {
        let auth_error = |reason: String| ScraperError::AuthTokenError {
            site: site.name.clone(),
            reason,
        };

        let request = HttpRequest::new(site.base_url.clone());
        let response = self
            .scraper
            .fetch(&request)
            .await
            .map_err(|e| auth_error(e.to_string()))?;

        if !response.is_success() {
            return Err(auth_error(format!(
                "landing page returned status {}",
                response.status
            )));
        }

        let token = extract_token(&site.name, &response.body, &site.token_field)?;
        debug!("Obtained {} token for {}", site.token_field, site.name);
        Ok(token)
    }

    pub async fn fetch_month(
        &self,
        site: &SiteConfig,
        year: i32,
        month: u32,
        token: &str,
    ) -> ScraperResult<ResultStore> {
        let request = HttpRequest::new(site.base_url.clone())
            .with_query("date_set[year]", year)
            .with_query("date_set[month]", month)
            .with_query(site.token_field.as_str(), token);

        info!("Scraping {} for {}-{:02}", site.name, year, month);
        let response = match self.scraper.fetch(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    "Month fetch for {} {}-{:02} failed: {}",
                    site.name, year, month, e
                );
                return Err(e);
            }
        };

        if !response.is_success() {
            error!(
                "Month fetch for {} {}-{:02} returned status {}",
                site.name, year, month, response.status
            );
            return Err(ScraperError::FetchFailed {
                url: response.url.to_string(),
                status: response.status,
            });
        }

        let store = self.parse_month(site, &response.body, year, month);
        self.stats.finish();
        Ok(store)
    }

    /// Selects the day cells of a month page and parses every one of them.
    pub fn parse_month(&self, site: &SiteConfig, body: &str, year: i32, month: u32) -> ResultStore {
        let document = Html::parse_document(body);
        let cells = select_day_cells(
            &document,
            &site.cell_selector,
            &site.date_extraction,
            year,
            month,
        );

        if cells.is_empty() {
            warn!(
                "No day cells found for {} {}-{:02}; the page layout may have changed",
                site.name, year, month
            );
        }

        let mut store = ResultStore::new();
        for cell in &cells {
            let records = site.record_pattern.parse(&cell.text);
            if records.is_empty() {
                debug!("No records in {} cell for {}: {:?}", site.name, cell.date, cell.text);
            }
            if store.insert(cell.date, records).is_some() {
                warn!("Duplicate day cell for {}, keeping the last one", cell.date);
            }
        }

        self.stats.record_parse(cells.len(), store.record_count());
        info!(
            "Parsed {} records across {} days for {} {}-{:02}",
            store.record_count(),
            store.len(),
            site.name,
            year,
            month
        );
        store
    }
}
