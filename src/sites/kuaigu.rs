use super::SiteConfig;
use crate::parser::DateExtraction;
use crate::ScraperResult;
use regex::Regex;

const NAME: &str = "檜谷山莊";
const BASE_URL: &str = "https://kgonline.forest.gov.tw/room/index.php";
const CELL_SELECTOR: &str = r#"div.cendle_table[id^="tds_"]"#;
const ONCLICK_ATTRIBUTE: &str = "onclick";
const ONCLICK_DATE: &str = r"date=(\d{4}-\d{2}-\d{2})";

// The lodge and its campground each render a label, a capacity ending in
// "床位(N)" or "四人帳篷(N)", and a registration count. Consecutive parts are
// separated by whitespace and may share a line or sit on adjacent lines.
const RECORD_PATTERN: &str = concat!(
    r"(?P<name>檜谷山莊|周圍營地)[^\n]*\s",
    r"[^\n]*?[床位四人帳篷]\((?P<beds>\d+)\)[^\n]*\s",
    r"[^\n]*?目前報名\s*[:：]\s*(?P<current>\d+)",
);

pub(super) fn config() -> ScraperResult<SiteConfig> {
    SiteConfig::new(
        NAME,
        BASE_URL,
        CELL_SELECTOR,
        DateExtraction::AttributeDate {
            attribute: ONCLICK_ATTRIBUTE.to_string(),
            pattern: Regex::new(ONCLICK_DATE)?,
        },
        RECORD_PATTERN,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<crate::parser::DayRecord> {
        config().unwrap().record_pattern.parse(text)
    }

    #[test]
    fn test_lodge_and_campground() {
        let records = parse(
            "29\n檜谷山莊\n床位(20)\n目前報名 : 5\n周圍營地\n四人帳篷(6)\n目前報名 : 2",
        );

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "檜谷山莊");
        assert_eq!(records[0].beds.as_deref(), Some("20"));
        assert_eq!(records[0].current, "5");
        assert_eq!(records[1].name, "周圍營地");
        assert_eq!(records[1].beds.as_deref(), Some("6"));
        assert_eq!(records[1].current, "2");
        assert!(records.iter().all(|r| r.reserved.is_none()));
    }

    #[test]
    fn test_parts_on_one_line() {
        let records = parse("檜谷山莊 床位(20) 目前報名 : 5");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "檜谷山莊");
        assert_eq!(records[0].beds.as_deref(), Some("20"));
        assert_eq!(records[0].current, "5");
    }

    #[test]
    fn test_capacity_on_name_line() {
        let records = parse("29\n檜谷山莊 床位(20)\n目前報名 : 5");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "檜谷山莊");
        assert_eq!(records[0].beds.as_deref(), Some("20"));
        assert_eq!(records[0].current, "5");
    }

    #[test]
    fn test_unknown_area_is_ignored() {
        assert!(parse("停車場\n車位(30)\n目前報名 : 1").is_empty());
    }
}
