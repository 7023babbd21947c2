use std::sync::Arc;

use crate::api::{HttpItemSource, ItemSource};
use crate::app::error::{LensError, Result};
use crate::config::Config;
use crate::domain::Credential;
use crate::normalizer::Normalizer;
use crate::pipeline::{Collector, Enricher, Pipeline};

pub struct AppContext {
    pub config: Config,
    pub pipeline: Pipeline,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let source: Arc<dyn ItemSource + Send + Sync> = Arc::new(HttpItemSource::new(
            &config.api.base_url,
            config.api.timeout(),
        )?);
        Self::with_source(config, source)
    }

    /// Wire the pipeline around an arbitrary source.
    pub fn with_source(config: Config, source: Arc<dyn ItemSource + Send + Sync>) -> Result<Self> {
        let normalizer = Normalizer::with_offset_minutes(config.display.utc_offset_minutes)?;

        let collector = Collector::new(source.clone(), normalizer)
            .with_per_page(config.api.per_page)
            .with_pacer(config.pacing.page_pacer());
        let enricher = Enricher::new(source).with_pacer(config.pacing.item_pacer());

        Ok(Self {
            config,
            pipeline: Pipeline::from_parts(collector, enricher),
        })
    }

    /// Credential from `--token`, `QIITA_TOKEN` or the config file, in that order.
    pub fn credential(&self, explicit: Option<&str>) -> Result<Credential> {
        let token = self
            .config
            .resolve_token(explicit)
            .ok_or(LensError::MissingCredential)?;
        Credential::new(token)
    }
}
