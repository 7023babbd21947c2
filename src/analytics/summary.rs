use crate::domain::Item;

/// Sums over a set of items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub articles: usize,
    pub likes: u64,
    pub stocks: u64,
    pub views: u64,
}

/// Per-article means, truncated to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Averages {
    pub likes: f64,
    pub stocks: f64,
    pub views: f64,
}

impl Totals {
    pub fn of(items: &[Item]) -> Self {
        items.iter().fold(Self::default(), |mut acc, item| {
            acc.articles += 1;
            acc.likes += item.like_count;
            acc.stocks += item.stock_count;
            acc.views += item.view_count;
            acc
        })
    }

    pub fn averages(&self) -> Averages {
        Averages {
            likes: per_article(self.likes, self.articles),
            stocks: per_article(self.stocks, self.articles),
            views: per_article(self.views, self.articles),
        }
    }
}

/// `total / articles` floored to 2 decimals; 0.0 when there are no articles.
///
/// Done in integer hundredths so values like 0.29 don't floor to 0.28.
pub fn per_article(total: u64, articles: usize) -> f64 {
    if articles == 0 {
        return 0.0;
    }
    let hundredths = u128::from(total) * 100 / articles as u128;
    hundredths as f64 / 100.0
}
