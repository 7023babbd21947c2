use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime};

use crate::domain::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub articles: usize,
    pub likes: u64,
    pub stocks: u64,
}

impl MonthBucket {
    fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            articles: 0,
            likes: 0,
            stocks: 0,
        }
    }

    /// `YYYY-MM`
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Like/stock sums per calendar month.
///
/// Every month between the first and last item is present; months without
/// articles carry zero sums.
pub fn monthly(items: &[Item]) -> Vec<MonthBucket> {
    let mut buckets: BTreeMap<(i32, u32), MonthBucket> = BTreeMap::new();
    for item in items {
        let key = (item.created_at.year(), item.created_at.month());
        let bucket = buckets
            .entry(key)
            .or_insert_with(|| MonthBucket::empty(key.0, key.1));
        bucket.articles += 1;
        bucket.likes += item.like_count;
        bucket.stocks += item.stock_count;
    }

    let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back()) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let (mut year, mut month) = first;
    while (year, month) <= last {
        out.push(
            buckets
                .get(&(year, month))
                .copied()
                .unwrap_or_else(|| MonthBucket::empty(year, month)),
        );
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CumulativePoint {
    pub at: NaiveDateTime,
    pub id: String,
    pub likes: u64,
    pub stocks: u64,
}

/// Running like/stock totals in publication order.
pub fn cumulative(items: &[Item]) -> Vec<CumulativePoint> {
    let mut ordered: Vec<&Item> = items.iter().collect();
    ordered.sort_by_key(|item| item.created_at);

    let mut likes = 0;
    let mut stocks = 0;
    ordered
        .into_iter()
        .map(|item| {
            likes += item.like_count;
            stocks += item.stock_count;
            CumulativePoint {
                at: item.created_at,
                id: item.id.clone(),
                likes,
                stocks,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::item;

    #[test]
    fn test_monthly_fills_gaps() {
        let items = vec![
            item("a", "2023-11-03", 2, 1, 0),
            item("b", "2023-11-20", 3, 0, 0),
            item("c", "2024-02-10", 5, 4, 0),
        ];
        let months = monthly(&items);

        let keys: Vec<String> = months.iter().map(MonthBucket::key).collect();
        assert_eq!(keys, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
        assert_eq!((months[0].likes, months[0].stocks, months[0].articles), (5, 1, 2));
        assert_eq!((months[1].likes, months[1].articles), (0, 0));
        assert_eq!((months[3].likes, months[3].stocks), (5, 4));
    }

    #[test]
    fn test_monthly_empty() {
        assert!(monthly(&[]).is_empty());
    }

    #[test]
    fn test_cumulative_sorted_by_time() {
        let items = vec![
            item("late", "2024-03-01", 1, 1, 0),
            item("early", "2024-01-01", 10, 0, 0),
            item("mid", "2024-02-01", 5, 2, 0),
        ];
        let points = cumulative(&items);

        let ids: Vec<&str> = points.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "mid", "late"]);
        assert_eq!((points[2].likes, points[2].stocks), (16, 3));
        assert_eq!(points[1].likes, 15);
    }
}
