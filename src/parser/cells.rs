use chrono::{Datelike, NaiveDate};
use log::{debug, trace};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Tags whose boundaries separate lines of a cell's text.
const LINE_BREAKING_TAGS: [&str; 6] = ["br", "p", "div", "li", "tr", "td"];

/// How a selected cell tells which calendar day it renders.
#[derive(Debug, Clone)]
pub enum DateExtraction {
    /// `id="{prefix}DD"`: the day of month, combined with the requested
    /// year and month.
    IdSuffix { prefix: String },
    /// The full date is the first capture of `pattern` inside `attribute`,
    /// e.g. `onclick="window.location='order_terms.php?date=2024-03-29'"`.
    AttributeDate { attribute: String, pattern: Regex },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub text: String,
}

impl DateExtraction {
    fn extract(&self, element: &ElementRef<'_>, year: i32, month: u32) -> Option<NaiveDate> {
        match self {
            DateExtraction::IdSuffix { prefix } => {
                let day = element
                    .value()
                    .id()?
                    .strip_prefix(prefix.as_str())?
                    .parse::<u32>()
                    .ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
            DateExtraction::AttributeDate { attribute, pattern } => {
                let value = element.value().attr(attribute)?;
                let date = pattern.captures(value)?.get(1)?.as_str();
                NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
            }
        }
    }
}

/// Day cells of a month page, in document order. Cells whose date cannot be
/// read, or that belong to a neighbouring month, are skipped.
pub fn select_day_cells(
    document: &Html,
    selector: &Selector,
    extraction: &DateExtraction,
    year: i32,
    month: u32,
) -> Vec<DayCell> {
    let mut cells = Vec::new();

    for element in document.select(selector) {
        let Some(date) = extraction.extract(&element, year, month) else {
            debug!(
                "Skipping cell without a readable date (id={:?})",
                element.value().id()
            );
            continue;
        };

        if date.year() != year || date.month() != month {
            trace!("Skipping {} outside {}-{:02}", date, year, month);
            continue;
        }

        cells.push(DayCell {
            date,
            text: cell_text(element),
        });
    }

    cells
}

/// Flattens a cell to trimmed, non-empty lines joined by `\n`.
pub fn cell_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: ElementRef<'_>, buf: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            buf.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let breaks = LINE_BREAKING_TAGS.contains(&child_element.value().name());
            if breaks {
                buf.push('\n');
            }
            collect_text(child_element, buf);
            if breaks {
                buf.push('\n');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_suffix() -> DateExtraction {
        DateExtraction::IdSuffix {
            prefix: "tds_".to_string(),
        }
    }

    fn onclick_date() -> DateExtraction {
        DateExtraction::AttributeDate {
            attribute: "onclick".to_string(),
            pattern: Regex::new(r"date=(\d{4}-\d{2}-\d{2})").unwrap(),
        }
    }

    #[test]
    fn test_id_suffix_cells() {
        let html = Html::parse_document(
            r#"<table><tr>
                <td><a id="tds_01" href="javascript:void(0)">嘉明湖山屋<br>目前報名: 3</a></td>
                <td><a id="tds_15" href="javascript:void(0)">嘉明湖山屋</a></td>
                <td><a id="nav_next" href="javascript:void(0)">下個月</a></td>
            </tr></table>"#,
        );
        let selector = Selector::parse(r#"a[id^="tds_"]"#).unwrap();
        let cells = select_day_cells(&html, &selector, &id_suffix(), 2024, 3);

        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(cells[0].text, "嘉明湖山屋\n目前報名: 3");
        assert_eq!(cells[1].date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_id_suffix_skips_invalid_days() {
        let html = Html::parse_document(
            r#"<a id="tds_30">x</a><a id="tds_xx">y</a><a id="tds_29">z</a>"#,
        );
        let selector = Selector::parse(r#"a[id^="tds_"]"#).unwrap();
        let cells = select_day_cells(&html, &selector, &id_suffix(), 2023, 2);

        assert!(cells.is_empty());
    }

    #[test]
    fn test_attribute_date_cells() {
        let html = Html::parse_document(
            r#"
            <div class="cendle_table" id="tds_0" onclick="window.location='/room/order_terms.php?date=2024-02-29'">舊</div>
            <div class="cendle_table" id="tds_1" onclick="window.location='/room/order_terms.php?date=2024-03-01'">
                <p>檜谷山莊</p>
            </div>
            <div class="cendle_table" id="tds_2">無連結</div>
            <div class="cendle_table" id="tds_3" onclick="alert('full')">額滿</div>
            "#,
        );
        let selector = Selector::parse("div.cendle_table").unwrap();
        let cells = select_day_cells(&html, &selector, &onclick_date(), 2024, 3);

        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(cells[0].text, "檜谷山莊");
    }

    #[test]
    fn test_cell_text_splits_on_block_tags() {
        let html = Html::parse_fragment(
            r#"<div id="cell"><div>檜谷山莊</div><span>床位</span>(20)<br>
                  <div>目前報名 : <b>5</b></div></div>"#,
        );
        let selector = Selector::parse("#cell").unwrap();
        let cell = html.select(&selector).next().unwrap();

        assert_eq!(cell_text(cell), "檜谷山莊\n床位(20)\n目前報名 : 5");
    }
}
