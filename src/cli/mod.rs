pub mod commands;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::analytics::RankBy;

#[derive(Parser)]
#[command(name = "qiita-lens")]
#[command(about = "Likes, stocks and views for your Qiita articles", long_about = None)]
pub struct Cli {
    /// Access token (takes precedence over QIITA_TOKEN and the config file)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Config file to use instead of ~/.config/qiita-lens/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging for this crate
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which articles to aggregate over
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day to include, in full (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Include limited-sharing articles
    #[arg(long)]
    pub include_private: bool,

    /// Skip per-article stock lookups (stocks are reported as 0)
    #[arg(long)]
    pub no_stocks: bool,

    /// Drop cached items and stock counts and fetch them again
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List articles with their counts
    Items {
        #[command(flatten)]
        filter: FilterArgs,

        /// Newest articles first
        #[arg(long)]
        newest_first: bool,
    },
    /// Totals and per-article averages
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Top articles by likes, stocks or views
    Ranking {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, value_enum, default_value_t = RankArg::Likes)]
        by: RankArg,

        /// Number of rows (default from config)
        #[arg(long)]
        top: Option<usize>,
    },
    /// Per-tag totals and averages
    Tags {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long)]
        top: Option<usize>,

        /// Break the top tags down by month
        #[arg(long)]
        monthly: bool,
    },
    /// Monthly likes and stocks
    Timeline {
        #[command(flatten)]
        filter: FilterArgs,

        /// Running totals per article instead of monthly sums
        #[arg(long)]
        cumulative: bool,
    },
    /// Articles stocked more often than liked
    StockHeavy {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long)]
        top: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RankArg {
    Likes,
    Stocks,
    Views,
}

impl From<RankArg> for RankBy {
    fn from(arg: RankArg) -> Self {
        match arg {
            RankArg::Likes => RankBy::Likes,
            RankArg::Stocks => RankBy::Stocks,
            RankArg::Views => RankBy::Views,
        }
    }
}
