//! Configuration management for qiita-lens.
//!
//! Configuration is read from `~/.config/qiita-lens/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::http_client::DEFAULT_BASE_URL;
use crate::api::MAX_PER_PAGE;
use crate::normalizer::DEFAULT_UTC_OFFSET_MINUTES;
use crate::pipeline::pacing::{Pacer, DEFAULT_ITEM_DELAY, DEFAULT_PAGE_DELAY};

/// Environment variable consulted for the access token.
pub const TOKEN_ENV: &str = "QIITA_TOKEN";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Personal access token (read_qiita scope is enough)
    pub token: Option<String>,
    pub api: ApiConfig,
    pub pacing: PacingConfig,
    pub display: DisplayConfig,
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root (default: https://qiita.com/api/v2)
    pub base_url: String,

    /// Items per list page, at most 100 (default: 100)
    pub per_page: u32,

    /// Per-request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: MAX_PER_PAGE,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Fixed delays between requests; 0 disables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay between list pages in milliseconds (default: 100)
    pub page_delay_ms: u64,

    /// Delay between stock lookups in milliseconds (default: 50)
    pub item_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: DEFAULT_PAGE_DELAY.as_millis() as u64,
            item_delay_ms: DEFAULT_ITEM_DELAY.as_millis() as u64,
        }
    }
}

impl PacingConfig {
    pub fn page_pacer(&self) -> Pacer {
        Pacer::from_millis(self.page_delay_ms)
    }

    pub fn item_pacer(&self) -> Pacer {
        Pacer::from_millis(self.item_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Offset timestamps are shown in, in minutes east of UTC (default: 540, JST)
    pub utc_offset_minutes: i32,

    /// Rows in rankings and tag tables (default: 30)
    pub top_n: usize,

    /// Count limited-sharing articles by default (default: false)
    pub include_private: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            top_n: 30,
            include_private: false,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/qiita-lens/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("qiita-lens").join("config.toml"))
    }

    /// Pick the token: explicit value first, then `QIITA_TOKEN`, then the file.
    pub fn resolve_token(&self, explicit: Option<&str>) -> Option<String> {
        let from_env = std::env::var(TOKEN_ENV).ok();
        Self::first_token([explicit.map(String::from), from_env, self.token.clone()])
    }

    fn first_token<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
        candidates
            .into_iter()
            .flatten()
            .map(|t| t.trim().to_string())
            .find(|t| !t.is_empty())
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# qiita-lens configuration
#
# The access token can also come from --token or the QIITA_TOKEN
# environment variable; both take precedence over this file.
# token = "your personal access token"

[api]
# API root
base_url = "https://qiita.com/api/v2"

# Items per list page (the API allows at most 100)
per_page = 100

# Per-request timeout in seconds
timeout_secs = 30

[pacing]
# Courtesy delay between list pages (milliseconds, 0 disables)
page_delay_ms = 100

# Courtesy delay between per-article stock lookups (milliseconds, 0 disables)
item_delay_ms = 50

[display]
# Timestamps are converted to this offset, in minutes east of UTC
utc_offset_minutes = 540

# Rows shown in rankings and tag tables
top_n = 30

# Include limited-sharing (private) articles in aggregates
include_private = false
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
