pub mod core;
pub mod http;
pub mod parser;
pub mod scrapers;
pub mod sites;
pub mod stats;

pub use crate::core::{
    Crawler, DataView, DateQuery, OutputFormat, ResultStore, ScrapeSession, ScraperConfig,
    ScraperError, ScraperResult, Table,
};
pub use http::{HttpRequest, HttpResponse};
pub use parser::DayRecord;
pub use scrapers::Scraper;
pub use sites::{Site, SiteConfig};
pub use stats::StatsTracker;
