//! Per-category aggregation over the whole log.

use crate::{Category, UsageLog};

/// Sum of liters per category
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    pub brushing: u64,
    pub bathing: u64,
    pub cooking: u64,
    pub other: u64,
}

impl CategoryTotals {
    pub fn from_log(log: &UsageLog) -> Self {
        log.records()
            .iter()
            .fold(Self::default(), |mut totals, record| {
                totals.brushing += u64::from(record.brushing);
                totals.bathing += u64::from(record.bathing);
                totals.cooking += u64::from(record.cooking);
                totals.other += u64::from(record.other);
                totals
            })
    }

    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Brushing => self.brushing,
            Category::Bathing => self.bathing,
            Category::Cooking => self.cooking,
            Category::Other => self.other,
        }
    }

    /// (category, total) pairs in column order
    pub fn entries(&self) -> [(Category, u64); 4] {
        Category::ALL.map(|c| (c, self.get(c)))
    }

    pub fn grand_total(&self) -> u64 {
        self.brushing + self.bathing + self.cooking + self.other
    }

    pub fn max(&self) -> u64 {
        self.brushing
            .max(self.bathing)
            .max(self.cooking)
            .max(self.other)
    }
}
