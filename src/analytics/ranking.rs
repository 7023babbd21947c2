use crate::domain::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    /// Likes, ties broken by stocks
    Likes,
    /// Stocks, ties broken by likes
    Stocks,
    Views,
}

impl RankBy {
    fn key(self, item: &Item) -> (u64, u64) {
        match self {
            RankBy::Likes => (item.like_count, item.stock_count),
            RankBy::Stocks => (item.stock_count, item.like_count),
            RankBy::Views => (item.view_count, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<'a> {
    /// 1-based position
    pub rank: usize,
    pub item: &'a Item,
}

/// Top `top_n` items by `by`, highest first. Equal keys keep input order.
pub fn rank(items: &[Item], by: RankBy, top_n: usize) -> Vec<Ranked<'_>> {
    let mut sorted: Vec<&Item> = items.iter().collect();
    sorted.sort_by(|a, b| by.key(b).cmp(&by.key(a)));
    sorted
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(i, item)| Ranked { rank: i + 1, item })
        .collect()
}

/// Items stocked more often than liked, most stocked first.
pub fn stock_heavy(items: &[Item], top_n: usize) -> Vec<&Item> {
    let mut heavy: Vec<&Item> = items
        .iter()
        .filter(|item| item.stock_count > item.like_count)
        .collect();
    heavy.sort_by(|a, b| b.stock_count.cmp(&a.stock_count));
    heavy.truncate(top_n);
    heavy
}
