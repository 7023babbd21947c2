use chrono::{FixedOffset, Offset, Utc};

use crate::api::RawItem;
use crate::app::{LensError, Result};
use crate::domain::Item;

/// Asia/Tokyo; fixed because Japan observes no DST.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 9 * 60;

/// Converts wire items into domain [`Item`]s.
///
/// Timestamps are shifted into a single display offset and then stripped
/// of zone information so that range filters compare wall-clock times.
#[derive(Debug, Clone)]
pub struct Normalizer {
    offset: FixedOffset,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_MINUTES * 60)
                .unwrap_or_else(|| Utc.fix()),
        }
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset_minutes(minutes: i32) -> Result<Self> {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                LensError::Config(format!("UTC offset out of range: {} minutes", minutes))
            })?;
        Ok(Self { offset })
    }

    pub fn normalize(&self, raw: RawItem) -> Item {
        let created_at = raw.created_at.with_timezone(&self.offset).naive_local();

        let mut item = Item::new(raw.id, created_at);
        item.title = raw.title;
        item.url = raw.url;
        item.like_count = raw.likes_count.unwrap_or(0);
        item.view_count = raw.page_views_count.unwrap_or(0);
        item.is_private = raw.private.unwrap_or(false);
        item.tags = raw
            .tags
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tag| tag.name)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        item
    }

    pub fn normalize_all(&self, raw: Vec<RawItem>) -> Vec<Item> {
        raw.into_iter().map(|item| self.normalize(item)).collect()
    }
}
