use crate::core::store::ResultStore;
use crate::parser::DayRecord;
use crate::{ScraperError, ScraperResult};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A caller-supplied date: a single day or a whole month.
///
/// Accepts `YYYY-MM-DD` and `YYYY-MM` with `-` or `/` separators; zero
/// padding is optional (`2024/3/1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateQuery {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
}

impl DateQuery {
    pub fn year_month(&self) -> (i32, u32) {
        match self {
            DateQuery::Day(date) => (date.year(), date.month()),
            DateQuery::Month { year, month } => (*year, *month),
        }
    }
}

impl FromStr for DateQuery {
    type Err = ScraperError;

    fn from_str(s: &str) -> ScraperResult<Self> {
        let normalized = s.trim().replace('/', "-");

        if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
            return Ok(DateQuery::Day(date));
        }

        // Pinning the day to 1 lets chrono validate the month.
        NaiveDate::parse_from_str(&format!("{}-1", normalized), "%Y-%m-%d")
            .map(|first| DateQuery::Month {
                year: first.year(),
                month: first.month(),
            })
            .map_err(|_| ScraperError::InvalidDateFormat(s.to_string()))
    }
}

impl fmt::Display for DateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateQuery::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DateQuery::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The records themselves: a list for a day, a date map for a month.
    Records,
    #[default]
    Table,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dict" | "records" | "json" => Ok(OutputFormat::Records),
            "pandas" | "table" => Ok(OutputFormat::Table),
            other => Err(format!("unknown format '{}', expected records or table", other)),
        }
    }
}

/// What `ScrapeSession::get_data` hands back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataView {
    Day(Vec<DayRecord>),
    Month(ResultStore),
    Table(Table),
}

/// A row/column projection of parsed records.
///
/// Day queries give one row per entry with the record fields as columns;
/// month queries give one row per date with the entries as columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub index: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_records(records: &[DayRecord]) -> Self {
        let columns = ["name", "beds", "current", "reserved"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let rows = records
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.beds.clone().unwrap_or_default(),
                    r.current.clone(),
                    r.reserved.clone().unwrap_or_default(),
                ]
            })
            .collect();

        Self {
            columns,
            index: (0..records.len()).map(|i| i.to_string()).collect(),
            rows,
        }
    }

    pub fn from_store(store: &ResultStore) -> Self {
        let width = store.iter().map(|(_, records)| records.len()).max().unwrap_or(0);
        let rows = store
            .iter()
            .map(|(_, records)| {
                (0..width)
                    .map(|i| records.get(i).map(DayRecord::summary).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self {
            columns: (0..width).map(|i| i.to_string()).collect(),
            index: store.dates().map(|d| d.format("%Y-%m-%d").to_string()).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(f, "Empty table\nColumns: [{}]", self.columns.join(", "));
        }

        let index_width = self.index.iter().map(|i| display_width(i)).max().unwrap_or(0);
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(col, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| display_width(cell))
                    .chain(std::iter::once(display_width(header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{}", " ".repeat(index_width))?;
        for (header, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {}", pad(header, *width))?;
        }
        for (label, row) in self.index.iter().zip(&self.rows) {
            writeln!(f)?;
            write!(f, "{}", pad(label, index_width))?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, "  {}", pad(cell, *width))?;
            }
        }
        Ok(())
    }
}

// CJK characters occupy two terminal columns.
fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| if c.len_utf8() >= 3 { 2 } else { 1 })
        .sum()
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, beds: Option<&str>, current: &str) -> DayRecord {
        DayRecord {
            name: name.to_string(),
            beds: beds.map(str::to_string),
            current: current.to_string(),
            reserved: None,
        }
    }

    #[test]
    fn test_parse_day_queries() {
        let expected = DateQuery::Day(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        for input in ["2024-03-01", "2024/03/01", "2024-3-1", "2024/3/1", " 2024-03-01 "] {
            assert_eq!(input.parse::<DateQuery>().unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_parse_month_queries() {
        let expected = DateQuery::Month {
            year: 2024,
            month: 3,
        };
        for input in ["2024-03", "2024/03", "2024-3", "2024/3"] {
            assert_eq!(input.parse::<DateQuery>().unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_rejects_invalid_dates() {
        for input in ["invalid-string", "", "2024", "2024-13", "2024-02-30", "03/01/2024"] {
            assert!(
                matches!(
                    input.parse::<DateQuery>(),
                    Err(ScraperError::InvalidDateFormat(ref raw)) if raw == input
                ),
                "{input}"
            );
        }
    }

    #[test]
    fn test_query_display_is_zero_padded() {
        assert_eq!("2024/3/1".parse::<DateQuery>().unwrap().to_string(), "2024-03-01");
        assert_eq!("2024/3".parse::<DateQuery>().unwrap().to_string(), "2024-03");
    }

    #[test]
    fn test_output_format_aliases() {
        assert_eq!("dict".parse::<OutputFormat>().unwrap(), OutputFormat::Records);
        assert_eq!("pandas".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_table_from_records() {
        let table = Table::from_records(&[
            record("檜谷山莊", Some("20"), "5"),
            record("周圍營地", None, "2"),
        ]);

        assert_eq!(table.columns, vec!["name", "beds", "current", "reserved"]);
        assert_eq!(table.index, vec!["0", "1"]);
        assert_eq!(table.rows[1], vec!["周圍營地", "", "2", ""]);
    }

    #[test]
    fn test_table_from_store_pads_short_rows() {
        let mut store = ResultStore::new();
        store.insert(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            vec![record("檜谷山莊", Some("20"), "5"), record("周圍營地", Some("6"), "2")],
        );
        store.insert(
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            vec![record("檜谷山莊", Some("20"), "0")],
        );

        let table = Table::from_store(&store);
        assert_eq!(table.columns, vec!["0", "1"]);
        assert_eq!(table.index, vec!["2024-03-01", "2024-03-02"]);
        assert_eq!(table.rows[0][1], "周圍營地 beds=6 current=2");
        assert_eq!(table.rows[1][1], "");
    }

    #[test]
    fn test_table_display_aligns_columns() {
        let table = Table::from_records(&[record("檜谷山莊", Some("20"), "5")]);
        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("name"));
        assert!(lines[1].starts_with("0  檜谷山莊"));
    }

    #[test]
    fn test_empty_table_display() {
        let table = Table::from_records(&[]);
        assert!(table.is_empty());
        assert!(table.to_string().starts_with("Empty table"));
    }
}
