use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    ClientError(String),

    #[error("Could not obtain CSRF token from {site}: {reason}")]
    AuthTokenError { site: String, reason: String },

    #[error("Month fetch for {url} failed with status {status}")]
    FetchFailed { url: String, status: u16 },

    #[error("Invalid date format '{0}', should be YYYY-MM-DD or YYYY-MM")]
    InvalidDateFormat(String),

    #[error("Invalid month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Requested month {requested} but the session covers {session}")]
    MonthMismatch { requested: String, session: String },

    #[error("Invalid record pattern: {0}")]
    PatternError(String),

    #[error("Invalid selector: {0}")]
    SelectorError(String),
}

impl From<regex::Error> for ScraperError {
    fn from(err: regex::Error) -> Self {
        ScraperError::PatternError(err.to_string())
    }
}

pub type ScraperResult<T> = Result<T, ScraperError>;
