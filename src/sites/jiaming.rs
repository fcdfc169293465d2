use super::SiteConfig;
use crate::parser::DateExtraction;
use crate::ScraperResult;

const NAME: &str = "嘉明湖山屋";
const BASE_URL: &str = "https://jmlnt.forest.gov.tw/room/index.php";
const CELL_SELECTOR: &str = r#"a[id^="tds_"]"#;
const DAY_ID_PREFIX: &str = "tds_";

// One entry per shelter: a name line, an optional "剩餘…(N)" line, the
// registration count, then an optional reserved count on the same or the
// following line.
const RECORD_PATTERN: &str = concat!(
    r"(?P<name>[^\n]+)\n",
    r"(?:剩餘[^\n]*?\((?P<beds>\d+)\)[^\n]*\n)?",
    r"目前報名\s*[:：]\s*(?P<current>\d+)",
    r"(?:[^\n]*?\n?[^\n]*?保留[^\d\n]*(?P<reserved>\d+))?",
);

pub(super) fn config() -> ScraperResult<SiteConfig> {
    SiteConfig::new(
        NAME,
        BASE_URL,
        CELL_SELECTOR,
        DateExtraction::IdSuffix {
            prefix: DAY_ID_PREFIX.to_string(),
        },
        RECORD_PATTERN,
    )
}
