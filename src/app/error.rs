use thiserror::Error;

#[derive(Error, Debug)]
pub enum LensError {
    #[error("Remote rejected request to {url} with HTTP {status}")]
    Rejected { status: u16, url: String },

    #[error("Transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid response header: {0}")]
    InvalidHeader(String),

    #[error("No access token configured (use --token, QIITA_TOKEN or the config file)")]
    MissingCredential,

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LensError {
    /// HTTP status of a remote rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            LensError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, LensError::Transport(_))
    }

    /// Suggested next step for the user, when one is obvious.
    pub fn hint(&self) -> Option<&'static str> {
        match self.status() {
            Some(401) => Some("the access token was rejected; check --token or QIITA_TOKEN"),
            Some(403) => Some("the access token lacks the read_qiita scope"),
            Some(429) => Some("rate limited by the API; wait a while and try again"),
            _ if self.is_transport() => Some("could not reach the API; check api.base_url"),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LensError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest only reports a status here when error_for_status was used
        match err.status() {
            Some(status) => LensError::Rejected {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => LensError::Transport(Box::new(err)),
        }
    }
}

pub type Result<T> = std::result::Result<T, LensError>;
