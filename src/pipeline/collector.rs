use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::{ItemSource, MAX_PER_PAGE};
use crate::app::Result;
use crate::domain::{Credential, Item};
use crate::normalizer::Normalizer;
use crate::pipeline::cache::SnapshotCache;
use crate::pipeline::pacing::{Pacer, DEFAULT_PAGE_DELAY};

/// Collects every item owned by a credential by walking the paged listing.
///
/// Results are memoized per credential; use [`Collector::refresh`] to force
/// a new walk.
pub struct Collector {
    source: Arc<dyn ItemSource + Send + Sync>,
    normalizer: Normalizer,
    per_page: u32,
    pacer: Pacer,
    cache: SnapshotCache,
}

impl Collector {
    pub fn new(source: Arc<dyn ItemSource + Send + Sync>, normalizer: Normalizer) -> Self {
        Self {
            source,
            normalizer,
            per_page: MAX_PER_PAGE,
            pacer: Pacer::new(DEFAULT_PAGE_DELAY),
            cache: SnapshotCache::new(),
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Cached snapshot for `credential`, fetching it on first use.
    pub async fn collect(&self, credential: &Credential) -> Result<Arc<[Item]>> {
        if let Some(snapshot) = self.cache.get(credential).await {
            debug!(%credential, items = snapshot.len(), "using cached snapshot");
            return Ok(snapshot);
        }

        let snapshot: Arc<[Item]> = self.fetch_all(credential).await?.into();
        self.cache.insert(credential, snapshot.clone()).await;
        Ok(snapshot)
    }

    /// Drop any cached snapshot and fetch again.
    pub async fn refresh(&self, credential: &Credential) -> Result<Arc<[Item]>> {
        self.invalidate(credential).await;
        self.collect(credential).await
    }

    pub async fn invalidate(&self, credential: &Credential) -> bool {
        self.cache.invalidate(credential).await
    }

    /// Walk every page without touching the cache.
    ///
    /// Stops after an empty batch or once a page lacks `rel="next"`. Any
    /// failure aborts the walk and the partial result is dropped.
    pub async fn fetch_all(&self, credential: &Credential) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let mut page = 1u32;

        loop {
            let batch = self
                .source
                .list_page(credential, page, self.per_page)
                .await?;
            let count = batch.items.len();
            debug!(page, count, has_next = batch.has_next, "fetched page");

            for item in self.normalizer.normalize_all(batch.items) {
                if seen.insert(item.id.clone()) {
                    items.push(item);
                } else {
                    // Listing shifted under us between pages
                    warn!(id = %item.id, page, "dropping duplicate item");
                }
            }

            if count == 0 || !batch.has_next {
                break;
            }

            page += 1;
            self.pacer.pause().await;
        }

        info!(%credential, pages = page, items = items.len(), "collected items");
        Ok(items)
    }
}
