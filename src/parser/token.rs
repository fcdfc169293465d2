use crate::{ScraperError, ScraperResult};
use scraper::{Html, Selector};

/// Reads the `value` of the hidden `<input name="{field}">` on a landing page.
pub fn extract_token(site: &str, html: &str, field: &str) -> ScraperResult<String> {
    let selector = Selector::parse(&format!("input[name=\"{}\"]", field))
        .map_err(|e| ScraperError::SelectorError(e.to_string()))?;
    let document = Html::parse_document(html);

    let input = document
        .select(&selector)
        .next()
        .ok_or_else(|| ScraperError::AuthTokenError {
            site: site.to_string(),
            reason: format!("no input named '{}' on the landing page", field),
        })?;

    input
        .value()
        .attr("value")
        .map(str::to_string)
        .ok_or_else(|| ScraperError::AuthTokenError {
            site: site.to_string(),
            reason: format!("input '{}' has no value attribute", field),
        })
}
