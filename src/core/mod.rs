pub mod config;
mod crawler;
mod errors;
pub mod query;
pub mod retry;
mod session;
mod store;

pub use config::ScraperConfig;
pub use crawler::Crawler;
pub use errors::{ScraperError, ScraperResult};
pub use query::{DataView, DateQuery, OutputFormat, Table};
pub use session::ScrapeSession;
pub use store::ResultStore;
