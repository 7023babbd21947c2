//! # qiita-lens
//!
//! Engagement statistics for the articles you published on Qiita.
//!
//! ## Architecture
//!
//! A small sequential pipeline feeding pure aggregations:
//!
//! ```text
//! ItemSource → Collector → Enricher → Filter → analytics
//! ```
//!
//! - [`api`]: `ItemSource` trait, reqwest client and `Link` header parsing
//! - [`pipeline`]: paginated collection, per-item stock enrichment, caches, pacing
//! - [`analytics`]: totals, averages, rankings, monthly and tag breakdowns
//!
//! ## Quick Start
//!
//! ```bash
//! export QIITA_TOKEN=...
//!
//! # Totals and averages for January
//! qiita-lens summary --from 2024-01-01 --to 2024-01-31
//!
//! # Top ten by stocks
//! qiita-lens ranking --by stocks --top 10
//!
//! # Monthly likes/stocks without per-article lookups
//! qiita-lens timeline --no-stocks
//! ```

/// Aggregations over collected items.
///
/// - [`Filter`](analytics::Filter) / [`DateRange`](analytics::DateRange): narrowing
/// - [`Totals`](analytics::Totals): sums and per-article averages
/// - [`rank`](analytics::rank), [`monthly`](analytics::monthly), [`tag_summary`](analytics::tag_summary)
pub mod analytics;

/// Remote API access.
///
/// - [`ItemSource`](api::ItemSource): async trait for the two endpoints used
/// - [`HttpItemSource`](api::HttpItemSource): reqwest-based implementation
/// - [`link`](api::link): `rel="next"` detection in `Link` headers
pub mod api;

/// Application context and error handling.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/qiita-lens/config.toml`.
pub mod config;

/// Core domain models: [`Item`](domain::Item), [`Credential`](domain::Credential).
pub mod domain;

/// Wire-to-domain conversion with time zone normalization.
pub mod normalizer;

/// Data acquisition: [`Collector`](pipeline::Collector) then [`Enricher`](pipeline::Enricher).
pub mod pipeline;
