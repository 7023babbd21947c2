//! Aggregate views over collected items.
//!
//! Everything here is pure: functions take a slice of [`Item`](crate::domain::Item)s
//! (usually already narrowed by a [`Filter`]) and return plain data for a
//! renderer to consume.

pub mod filter;
pub mod ranking;
pub mod summary;
pub mod tags;
pub mod timeline;

pub use filter::{DateRange, Filter};
pub use ranking::{rank, stock_heavy, RankBy, Ranked};
pub use summary::{Averages, Totals};
pub use tags::{tag_monthly, tag_summary, TagMonth, TagStats};
pub use timeline::{cumulative, monthly, CumulativePoint, MonthBucket};
