use crate::{ScraperError, ScraperResult};
use regex::Regex;
use serde::{Deserialize, Serialize};

const REQUIRED_GROUPS: [&str; 2] = ["name", "current"];

/// One shelter or campsite entry inside a day cell. Values are kept as the
/// text the site rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub name: String,
    pub beds: Option<String>,
    pub current: String,
    pub reserved: Option<String>,
}

impl DayRecord {
    /// Single-line rendering used for table cells.
    pub fn summary(&self) -> String {
        let mut parts = vec![self.name.clone()];
        if let Some(beds) = &self.beds {
            parts.push(format!("beds={}", beds));
        }
        parts.push(format!("current={}", self.current));
        if let Some(reserved) = &self.reserved {
            parts.push(format!("reserved={}", reserved));
        }
        parts.join(" ")
    }
}

/// A site's day-cell pattern. Must name `name` and `current` groups; `beds`
/// and `reserved` are read when present.
#[derive(Debug, Clone)]
pub struct RecordPattern {
    regex: Regex,
}

impl RecordPattern {
    pub fn new(pattern: &str) -> ScraperResult<Self> {
        let regex = Regex::new(pattern)?;
        for group in REQUIRED_GROUPS {
            if !regex.capture_names().flatten().any(|name| name == group) {
                return Err(ScraperError::PatternError(format!(
                    "pattern is missing the named group '{}'",
                    group
                )));
            }
        }
        Ok(Self { regex })
    }

    /// All records in the cell text, in order. No match yields an empty list.
    pub fn parse(&self, text: &str) -> Vec<DayRecord> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let group = |name: &str| {
                    caps.name(name)
                        .map(|m| m.as_str().trim().to_string())
                        .filter(|value| !value.is_empty())
                };

                Some(DayRecord {
                    name: group("name")?,
                    beds: group("beds"),
                    current: group("current")?,
                    reserved: group("reserved"),
                })
            })
            .collect()
    }
}
