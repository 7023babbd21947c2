use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// Item object as returned by `GET /authenticated_user/items`.
///
/// Only the fields we read are declared; everything else in the payload
/// (body, rendered_body, user, ...) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    pub created_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub likes_count: Option<u64>,
    #[serde(default)]
    pub page_views_count: Option<u64>,
    #[serde(default)]
    pub private: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<RawTag>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTag {
    #[serde(default)]
    pub name: Option<String>,
}
