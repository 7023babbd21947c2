pub mod http_client;
pub mod link;
pub mod wire;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Credential;

pub use http_client::HttpItemSource;
pub use wire::{RawItem, RawTag};

/// Remote API maximum for `per_page`.
pub const MAX_PER_PAGE: u32 = 100;

/// One page of the authenticated user's item listing.
#[derive(Debug, Clone)]
pub struct ItemPage {
    pub items: Vec<RawItem>,
    /// Whether the `Link` header carried `rel="next"`.
    pub has_next: bool,
}

#[async_trait]
pub trait ItemSource {
    /// Fetch one page (1-based) of the credential owner's items.
    async fn list_page(&self, credential: &Credential, page: u32, per_page: u32)
        -> Result<ItemPage>;

    /// Number of users who stocked `item_id`.
    async fn stocker_count(&self, credential: &Credential, item_id: &str) -> Result<u64>;
}
