pub mod cache;
pub mod collector;
pub mod enricher;
pub mod pacing;

#[cfg(test)]
pub(crate) mod testing;

use tracing::debug;

use crate::app::Result;
use crate::domain::{Credential, Item};

pub use cache::{SnapshotCache, StockCache};
pub use collector::Collector;
pub use enricher::{EnrichReport, Enricher};
pub use pacing::Pacer;

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub items: Vec<Item>,
    pub report: EnrichReport,
}

/// Collector followed by Enricher, sharing one [`ItemSource`](crate::api::ItemSource).
pub struct Pipeline {
    collector: Collector,
    enricher: Enricher,
}

impl Pipeline {
    pub fn from_parts(collector: Collector, enricher: Enricher) -> Self {
        Self {
            collector,
            enricher,
        }
    }

    /// Collect (or reuse) the credential's items and fill in stock counts.
    pub async fn run(&self, credential: &Credential, enrich: bool) -> Result<PipelineRun> {
        let snapshot = self.collector.collect(credential).await?;
        let (items, report) = self
            .enricher
            .enrich(credential, snapshot.to_vec(), enrich)
            .await;
        Ok(PipelineRun { items, report })
    }

    /// Like [`Pipeline::run`], but discards everything cached for the credential first.
    pub async fn refresh(&self, credential: &Credential, enrich: bool) -> Result<PipelineRun> {
        let dropped = self.enricher.invalidate(credential).await;
        debug!(%credential, dropped, "forgot cached stock counts");

        let snapshot = self.collector.refresh(credential).await?;
        let (items, report) = self
            .enricher
            .enrich(credential, snapshot.to_vec(), enrich)
            .await;
        Ok(PipelineRun { items, report })
    }
}
