//! Core domain types for AquaTrack.
//!
//! - Usage categories and their chart colours
//! - A single day's usage record
//! - The ordered usage log and its fixed tabular schema

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column names of the persisted table, in file order
pub const COLUMNS: [&str; 5] = ["Date", "Brushing", "Bathing", "Cooking", "Other"];

/// Date format used for every stored record (day-month-year)
pub const DATE_FORMAT: &str = "%d-%m-%Y";

// ============================================================================
// Categories
// ============================================================================

/// Activity that consumed water
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Brushing,
    Bathing,
    Cooking,
    Other,
}

impl Category {
    /// All categories in column order
    pub const ALL: [Category; 4] = [
        Category::Brushing,
        Category::Bathing,
        Category::Cooking,
        Category::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Brushing => "Brushing",
            Category::Bathing => "Bathing",
            Category::Cooking => "Cooking",
            Category::Other => "Other",
        }
    }

    /// Fixed chart colour as (red, green, blue)
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Category::Brushing => (0xFF, 0xD7, 0x00),
            Category::Bathing => (0x00, 0xCE, 0xD1),
            Category::Cooking => (0xF5, 0xA6, 0x23),
            Category::Other => (0xD0, 0x02, 0x1B),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Records
// ============================================================================

/// Liters used on one day, per activity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Brushing")]
    pub brushing: u32,
    #[serde(rename = "Bathing")]
    pub bathing: u32,
    #[serde(rename = "Cooking")]
    pub cooking: u32,
    #[serde(rename = "Other")]
    pub other: u32,
}

impl UsageRecord {
    pub fn liters(&self, category: Category) -> u32 {
        match category {
            Category::Brushing => self.brushing,
            Category::Bathing => self.bathing,
            Category::Cooking => self.cooking,
            Category::Other => self.other,
        }
    }
}

/// Ordered collection of usage records
///
/// Insertion order is preserved and duplicate dates are kept. The schema
/// is fixed, so an empty log still has all five columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsageLog {
    records: Vec<UsageRecord>,
}

impl UsageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<UsageRecord>) -> Self {
        Self { records }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: UsageRecord) {
        self.records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_log_keeps_schema() {
        let log = UsageLog::new();
        assert!(log.is_empty());
        assert_eq!(
            log.columns(),
            &["Date", "Brushing", "Bathing", "Cooking", "Other"]
        );
    }

    #[test]
    fn test_duplicate_dates_retained_in_order() {
        let mut log = UsageLog::new();
        for liters in [1, 2] {
            log.push(UsageRecord {
                date: "01-02-2024".into(),
                brushing: liters,
                bathing: 0,
                cooking: 0,
                other: 0,
            });
        }
        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].brushing, 1);
        assert_eq!(log.records()[1].brushing, 2);
    }

    #[test]
    fn test_liters_by_category() {
        let record = UsageRecord {
            date: "01-02-2024".into(),
            brushing: 5,
            bathing: 20,
            cooking: 3,
            other: 2,
        };
        let liters: Vec<u32> = Category::ALL.iter().map(|c| record.liters(*c)).collect();
        assert_eq!(liters, vec![5, 20, 3, 2]);
    }
}
