use crate::core::config::ScraperConfig;
use crate::core::crawler::Crawler;
use crate::core::query::{DataView, DateQuery, OutputFormat, Table};
use crate::core::store::ResultStore;
use crate::scrapers::HttpScraper;
use crate::sites::SiteConfig;
use crate::{Scraper, ScraperError, ScraperResult, StatsTracker};
use chrono::NaiveDate;
use log::{debug, info};
use tokio::sync::OnceCell;

/// One site and month. The CSRF token is fetched when the session is opened;
/// the month page is fetched on first use and kept for the session's lifetime.
///
/// A failed month fetch leaves the session unscraped, so the next call tries
/// again. Concurrent callers share a single in-flight fetch.
pub struct ScrapeSession {
    site: SiteConfig,
    year: i32,
    month: u32,
    token: String,
    crawler: Crawler,
    store: OnceCell<ResultStore>,
}

impl ScrapeSession {
    pub async fn connect(site: SiteConfig, year: i32, month: u32) -> ScraperResult<Self> {
        Self::connect_with_config(site, year, month, &ScraperConfig::default()).await
    }

    pub async fn connect_with_config(
        site: SiteConfig,
        year: i32,
        month: u32,
        config: &ScraperConfig,
    ) -> ScraperResult<Self> {
        let scraper = HttpScraper::with_config(config)?;
        Self::connect_with_scraper(site, year, month, Box::new(scraper)).await
    }

    pub async fn connect_with_scraper(
        site: SiteConfig,
        year: i32,
        month: u32,
        scraper: Box<dyn Scraper>,
    ) -> ScraperResult<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ScraperError::InvalidMonth { year, month });
        }

        info!("Opening session for {} {}-{:02}", site.name, year, month);
        let crawler = Crawler::new(scraper);
        let token = crawler.fetch_token(&site).await?;

        Ok(Self {
            site,
            year,
            month,
            token,
            crawler,
            store: OnceCell::new(),
        })
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn stats(&self) -> &StatsTracker {
        self.crawler.stats()
    }

    pub fn is_scraped(&self) -> bool {
        self.store.initialized()
    }

    /// The month's records if they have already been fetched.
    pub fn result(&self) -> Option<&ResultStore> {
        self.store.get()
    }

    /// Fetches and parses the month page once; later calls reuse the result.
    pub async fn fetch(&self) -> ScraperResult<&ResultStore> {
        self.store
            .get_or_try_init(|| {
                self.crawler
                    .fetch_month(&self.site, self.year, self.month, &self.token)
            })
            .await
    }

    /// Looks up `date` (`YYYY-MM-DD` or `YYYY-MM`, `-` or `/`) in the month.
    ///
    /// The date is validated before any request is made. A day with no cell
    /// on the page yields an empty list. A day or month outside the session's
    /// month is rejected with [`ScraperError::MonthMismatch`].
    pub async fn get_data(&self, date: &str, format: OutputFormat) -> ScraperResult<DataView> {
        let query: DateQuery = date.parse()?;

        if query.year_month() != (self.year, self.month) {
            return Err(ScraperError::MonthMismatch {
                requested: query.to_string(),
                session: format!("{:04}-{:02}", self.year, self.month),
            });
        }

        let store = self.fetch().await?;
        debug!("Answering {} from {} cached days", query, store.len());

        Ok(match (query, format) {
            (DateQuery::Month { .. }, OutputFormat::Records) => DataView::Month(store.clone()),
            (DateQuery::Month { .. }, OutputFormat::Table) => {
                DataView::Table(Table::from_store(store))
            }
            (DateQuery::Day(day), OutputFormat::Records) => DataView::Day(store.get(&day).to_vec()),
            (DateQuery::Day(day), OutputFormat::Table) => {
                DataView::Table(Table::from_records(store.get(&day)))
            }
        })
    }
}
