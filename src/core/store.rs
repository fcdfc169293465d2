use crate::parser::DayRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Parsed records of one month, keyed by date. Serializes as a map with
/// `YYYY-MM-DD` keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultStore {
    days: BTreeMap<NaiveDate, Vec<DayRecord>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records previously stored for `date`, if any.
    pub fn insert(&mut self, date: NaiveDate, records: Vec<DayRecord>) -> Option<Vec<DayRecord>> {
        self.days.insert(date, records)
    }

    /// Records for `date`; empty when the site rendered no cell for it.
    pub fn get(&self, date: &NaiveDate) -> &[DayRecord] {
        self.days.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.days.contains_key(date)
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.days.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<DayRecord>)> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}
