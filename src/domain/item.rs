use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};

/// How trustworthy an item's `stock_count` is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockStatus {
    /// Enrichment was not requested; the count is a zero placeholder.
    #[default]
    Unrequested,
    /// The count was read from the stockers endpoint.
    Measured,
    /// The lookup failed and the count fell back to zero.
    Degraded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Local wall-clock time in the display offset, zone stripped.
    pub created_at: NaiveDateTime,
    pub like_count: u64,
    pub view_count: u64,
    pub stock_count: u64,
    pub stock_status: StockStatus,
    pub is_private: bool,
    pub tags: BTreeSet<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            url: String::new(),
            created_at,
            like_count: 0,
            view_count: 0,
            stock_count: 0,
            stock_status: StockStatus::Unrequested,
            is_private: false,
            tags: BTreeSet::new(),
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.created_at.date()
    }

    /// Calendar month as `YYYY-MM`.
    pub fn month_key(&self) -> String {
        self.created_at.format("%Y-%m").to_string()
    }
}
