use std::collections::{BTreeMap, HashSet};

use crate::domain::Item;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagStats {
    pub tag: String,
    pub articles: usize,
    pub likes_sum: u64,
    pub stocks_sum: u64,
    pub views_sum: u64,
}

impl TagStats {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            articles: 0,
            likes_sum: 0,
            stocks_sum: 0,
            views_sum: 0,
        }
    }

    fn add(&mut self, item: &Item) {
        self.articles += 1;
        self.likes_sum += item.like_count;
        self.stocks_sum += item.stock_count;
        self.views_sum += item.view_count;
    }

    pub fn likes_avg(&self) -> f64 {
        mean(self.likes_sum, self.articles)
    }

    pub fn stocks_avg(&self) -> f64 {
        mean(self.stocks_sum, self.articles)
    }

    pub fn views_avg(&self) -> f64 {
        mean(self.views_sum, self.articles)
    }
}

fn mean(sum: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Per-tag totals; an article counts once for each of its tags.
///
/// Ordered by likes, then stocks, highest first; ties by tag name.
pub fn tag_summary(items: &[Item]) -> Vec<TagStats> {
    let mut by_tag: BTreeMap<&str, TagStats> = BTreeMap::new();
    for item in items {
        for tag in &item.tags {
            by_tag
                .entry(tag.as_str())
                .or_insert_with(|| TagStats::new(tag))
                .add(item);
        }
    }

    let mut stats: Vec<TagStats> = by_tag.into_values().collect();
    stats.sort_by(|a, b| {
        (b.likes_sum, b.stocks_sum)
            .cmp(&(a.likes_sum, a.stocks_sum))
            .then_with(|| a.tag.cmp(&b.tag))
    });
    stats
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMonth {
    /// `YYYY-MM`
    pub month: String,
    pub tag: String,
    pub likes_sum: u64,
    pub stocks_sum: u64,
    pub views_sum: u64,
}

/// Monthly sums for the given tags only, ordered by month then tag.
pub fn tag_monthly(items: &[Item], tags: &[String]) -> Vec<TagMonth> {
    let wanted: HashSet<&str> = tags.iter().map(String::as_str).collect();
    let mut cells: BTreeMap<(String, String), TagMonth> = BTreeMap::new();

    for item in items {
        let month = item.month_key();
        for tag in item.tags.iter().filter(|t| wanted.contains(t.as_str())) {
            let cell = cells
                .entry((month.clone(), tag.clone()))
                .or_insert_with(|| TagMonth {
                    month: month.clone(),
                    tag: tag.clone(),
                    likes_sum: 0,
                    stocks_sum: 0,
                    views_sum: 0,
                });
            cell.likes_sum += item.like_count;
            cell.stocks_sum += item.stock_count;
            cell.views_sum += item.view_count;
        }
    }

    cells.into_values().collect()
}
