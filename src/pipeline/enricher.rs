use std::sync::Arc;

use tracing::{debug, info};

use crate::api::ItemSource;
use crate::domain::{Credential, Item, StockStatus};
use crate::pipeline::cache::StockCache;
use crate::pipeline::pacing::{Pacer, DEFAULT_ITEM_DELAY};

/// Outcome counts of one enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichReport {
    pub measured: usize,
    pub degraded: usize,
    pub cached: usize,
}

/// Fills in per-item stock counts, one lookup at a time.
///
/// Lookups are best effort: a failure only affects its own item, which
/// gets a zero count and [`StockStatus::Degraded`].
///
/// Only measured counts are memoized per `(item id, credential)`. Failed
/// lookups are not cached, so the next pass requests them again.
pub struct Enricher {
    source: Arc<dyn ItemSource + Send + Sync>,
    pacer: Pacer,
    cache: StockCache,
}

impl Enricher {
    pub fn new(source: Arc<dyn ItemSource + Send + Sync>) -> Self {
        Self {
            source,
            pacer: Pacer::new(DEFAULT_ITEM_DELAY),
            cache: StockCache::new(),
        }
    }

    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub async fn enrich(
        &self,
        credential: &Credential,
        mut items: Vec<Item>,
        enabled: bool,
    ) -> (Vec<Item>, EnrichReport) {
        let mut report = EnrichReport::default();

        if !enabled {
            for item in &mut items {
                item.stock_count = 0;
                item.stock_status = StockStatus::Unrequested;
            }
            return (items, report);
        }

        let mut requested = false;
        for item in &mut items {
            if let Some(count) = self.cache.get(&item.id, credential).await {
                item.stock_count = count;
                item.stock_status = StockStatus::Measured;
                report.cached += 1;
                continue;
            }

            if requested {
                self.pacer.pause().await;
            }
            requested = true;

            match self.source.stocker_count(credential, &item.id).await {
                Ok(count) => {
                    self.cache.insert(&item.id, credential, count).await;
                    item.stock_count = count;
                    item.stock_status = StockStatus::Measured;
                    report.measured += 1;
                }
                Err(e) => {
                    debug!(id = %item.id, error = %e, "stock lookup failed, counting as zero");
                    item.stock_count = 0;
                    item.stock_status = StockStatus::Degraded;
                    report.degraded += 1;
                }
            }
        }

        info!(
            measured = report.measured,
            degraded = report.degraded,
            cached = report.cached,
            "enriched stock counts"
        );
        (items, report)
    }

    /// Forget counts measured with `credential`.
    pub async fn invalidate(&self, credential: &Credential) -> usize {
        self.cache.invalidate(credential).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::time::Instant;

    use crate::normalizer::Normalizer;
    use crate::pipeline::testing::{raw_item, Reply, ScriptedSource};

    fn token() -> Credential {
        Credential::new("test-token").unwrap()
    }

    fn items(ids: &[&str]) -> Vec<Item> {
        let normalizer = Normalizer::new();
        ids.iter()
            .map(|id| normalizer.normalize(raw_item(id, "2024-01-15T10:00:00+09:00", 3)))
            .collect()
    }

    fn enricher(source: Arc<ScriptedSource>) -> Enricher {
        Enricher::new(source).with_pacer(Pacer::disabled())
    }

    #[tokio::test]
    async fn test_disabled_makes_no_calls() {
        let source = Arc::new(ScriptedSource::new().stock("a", Reply::Ok(9)));
        let enricher = enricher(source.clone());

        let mut input = items(&["a", "b"]);
        input[0].stock_count = 42;
        let (out, report) = enricher.enrich(&token(), input, false).await;

        assert!(out.iter().all(|i| i.stock_count == 0));
        assert!(out
            .iter()
            .all(|i| i.stock_status == StockStatus::Unrequested));
        assert_eq!(report, EnrichReport::default());
        assert_eq!(source.stock_call_count(), 0);
    }

    #[tokio::test]
    async fn test_forbidden_item_degrades_alone() {
        let source = Arc::new(
            ScriptedSource::new()
                .stock("a", Reply::Ok(4))
                .stock("x", Reply::Reject(403))
                .stock("c", Reply::Ok(11)),
        );
        let enricher = enricher(source.clone());

        let (out, report) = enricher
            .enrich(&token(), items(&["a", "x", "c"]), true)
            .await;

        assert_eq!(out.len(), 3);
        assert_eq!((out[0].stock_count, out[0].stock_status), (4, StockStatus::Measured));
        assert_eq!((out[1].stock_count, out[1].stock_status), (0, StockStatus::Degraded));
        assert_eq!((out[2].stock_count, out[2].stock_status), (11, StockStatus::Measured));
        assert_eq!(report.measured, 2);
        assert_eq!(report.degraded, 1);
        assert_eq!(source.stock_call_count(), 3);
    }

    #[tokio::test]
    async fn test_transport_and_header_failures_degrade() {
        let source = Arc::new(
            ScriptedSource::new()
                .stock("a", Reply::Transport)
                .stock("b", Reply::BadHeader),
        );
        let enricher = enricher(source);

        let (out, report) = enricher.enrich(&token(), items(&["a", "b"]), true).await;

        assert!(out.iter().all(|i| i.stock_count == 0));
        assert!(out.iter().all(|i| i.stock_status == StockStatus::Degraded));
        assert_eq!(report.degraded, 2);
    }

    #[tokio::test]
    async fn test_measured_zero_is_distinct_from_unknown() {
        let source = Arc::new(ScriptedSource::new().stock("a", Reply::Ok(0)));
        let enricher = enricher(source);

        let (out, _) = enricher.enrich(&token(), items(&["a"]), true).await;
        assert_eq!(out[0].stock_count, 0);
        assert_eq!(out[0].stock_status, StockStatus::Measured);
    }

    #[tokio::test]
    async fn test_second_pass_served_from_cache() {
        let source = Arc::new(
            ScriptedSource::new()
                .stock("a", Reply::Ok(5))
                .stock("b", Reply::Ok(6)),
        );
        let enricher = enricher(source.clone());

        enricher.enrich(&token(), items(&["a", "b"]), true).await;
        let (out, report) = enricher.enrich(&token(), items(&["a", "b"]), true).await;

        assert_eq!(out[1].stock_count, 6);
        assert_eq!(report.cached, 2);
        assert_eq!(report.measured + report.degraded, 0);
        assert_eq!(source.stock_call_count(), 2);
    }

    #[tokio::test]
    async fn test_degraded_items_retried_next_pass() {
        let source = Arc::new(ScriptedSource::new().stock("x", Reply::Reject(500)));
        let enricher = enricher(source.clone());

        enricher.enrich(&token(), items(&["x"]), true).await;
        enricher.enrich(&token(), items(&["x"]), true).await;

        assert_eq!(source.stock_call_count(), 2);
    }

    #[tokio::test]
    async fn test_cache_not_shared_across_credentials() {
        let source = Arc::new(ScriptedSource::new().stock("a", Reply::Ok(5)));
        let enricher = enricher(source.clone());

        enricher.enrich(&token(), items(&["a"]), true).await;
        let other = Credential::new("other-token").unwrap();
        let (_, report) = enricher.enrich(&other, items(&["a"]), true).await;

        assert_eq!(report.measured, 1);
        assert_eq!(source.stock_call_count(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_new_lookups() {
        let source = Arc::new(ScriptedSource::new().stock("a", Reply::Ok(5)));
        let enricher = enricher(source.clone());

        enricher.enrich(&token(), items(&["a"]), true).await;
        assert_eq!(enricher.invalidate(&token()).await, 1);
        enricher.enrich(&token(), items(&["a"]), true).await;

        assert_eq!(source.stock_call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_between_lookups_but_not_for_cache_hits() {
        let source = Arc::new(
            ScriptedSource::new()
                .stock("a", Reply::Ok(1))
                .stock("b", Reply::Reject(404))
                .stock("c", Reply::Ok(3)),
        );
        let enricher = Enricher::new(source.clone()).with_pacer(Pacer::from_millis(50));

        let start = Instant::now();
        enricher.enrich(&token(), items(&["a", "b", "c"]), true).await;
        let first = start.elapsed();
        assert!(first >= Duration::from_millis(100), "{:?}", first);
        assert!(first < Duration::from_millis(150), "{:?}", first);

        // "a" and "c" are cached; only "b" goes out, with nothing before it to wait on
        let start = Instant::now();
        let (_, report) = enricher.enrich(&token(), items(&["a", "b", "c"]), true).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(report.cached, 2);
        assert_eq!(report.degraded, 1);

        // Everything cached: no request, no pause
        let start = Instant::now();
        let (_, report) = enricher.enrich(&token(), items(&["a", "c"]), true).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(report.cached, 2);
        assert_eq!(source.stock_call_count(), 4);
    }
}
