use chrono::NaiveDate;

use crate::app::{LensError, Result};
use crate::domain::Item;

/// Inclusive calendar-date range over zone-naive `created_at`.
///
/// The end date counts in full: an item at 23:59 on `end` is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(LensError::InvalidDateRange(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Smallest range covering every item, or `None` for no items.
    pub fn spanning(items: &[Item]) -> Option<Self> {
        let start = items.iter().map(Item::date).min()?;
        let end = items.iter().map(Item::date).max()?;
        Some(Self { start, end })
    }

    /// Build from optional bounds, filling gaps from the items' own span.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        items: &[Item],
    ) -> Result<Option<Self>> {
        let span = Self::spanning(items);
        match (start, end, span) {
            (None, None, _) => Ok(None),
            (Some(start), Some(end), _) => Self::new(start, end).map(Some),
            (Some(start), None, Some(span)) => Self::new(start, span.end.max(start)).map(Some),
            (None, Some(end), Some(span)) => Self::new(span.start.min(end), end).map(Some),
            // No items to borrow a bound from
            (Some(day), None, None) | (None, Some(day), None) => Self::new(day, day).map(Some),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, item: &Item) -> bool {
        let day = item.date();
        day >= self.start && day <= self.end
    }
}

/// Which items an aggregate is computed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filter {
    pub range: Option<DateRange>,
    pub include_private: bool,
}

impl Filter {
    pub fn new(range: Option<DateRange>, include_private: bool) -> Self {
        Self {
            range,
            include_private,
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        if item.is_private && !self.include_private {
            return false;
        }
        self.range.map_or(true, |range| range.contains(item))
    }

    pub fn apply(&self, items: &[Item]) -> Vec<Item> {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}
