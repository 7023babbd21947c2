use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION, LINK};
use reqwest::{Client, ClientBuilder, Response};
use tracing::debug;
use url::Url;

use crate::api::link::has_next_page;
use crate::api::{ItemPage, ItemSource, RawItem, MAX_PER_PAGE};
use crate::app::{LensError, Result};
use crate::domain::Credential;

pub const DEFAULT_BASE_URL: &str = "https://qiita.com/api/v2";
pub const TOTAL_COUNT: &str = "total-count";

pub struct HttpItemSource {
    client: Client,
    base: Url,
}

impl HttpItemSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Self::with_builder(Client::builder(), base_url, timeout)
    }

    fn with_builder(builder: ClientBuilder, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = builder
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("qiita-lens/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(LensError::Config(format!(
                "API base URL cannot take paths: {}",
                base_url
            )));
        }

        Ok(Self { client, base })
    }

    /// Build `{base}/{segments...}?{query}`; segments are percent-encoded.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| LensError::Config(format!("invalid API base URL: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get(&self, credential: &Credential, url: Url) -> Result<Response> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, credential.bearer())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, status = status.as_u16(), "request rejected");
            return Err(LensError::Rejected {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ItemSource for HttpItemSource {
    async fn list_page(
        &self,
        credential: &Credential,
        page: u32,
        per_page: u32,
    ) -> Result<ItemPage> {
        let url = self.endpoint(
            &["authenticated_user", "items"],
            &[
                ("page", page.to_string()),
                ("per_page", per_page.clamp(1, MAX_PER_PAGE).to_string()),
            ],
        )?;

        let response = self.get(credential, url).await?;

        let has_next = link_has_next(response.headers())?;

        let body = response.bytes().await?;
        let items: Vec<RawItem> = serde_json::from_slice(&body)?;

        Ok(ItemPage { items, has_next })
    }

    async fn stocker_count(&self, credential: &Credential, item_id: &str) -> Result<u64> {
        let url = self.endpoint(&["items", item_id, "stockers"], &[("per_page", "1".into())])?;
        let response = self.get(credential, url).await?;
        parse_total_count(response.headers())
    }
}

/// Whether any `Link` header value advertises `rel="next"`.
///
/// An unreadable value is an error rather than "no next page", which would
/// silently cut the walk short.
pub fn link_has_next(headers: &HeaderMap) -> Result<bool> {
    let mut values = Vec::new();
    for value in headers.get_all(LINK) {
        let text = value
            .to_str()
            .map_err(|_| LensError::InvalidHeader("non-ASCII Link".into()))?;
        values.push(text);
    }
    Ok(has_next_page(&values.join(", ")))
}

/// Read the `Total-Count` header the API sets on paginated responses.
pub fn parse_total_count(headers: &HeaderMap) -> Result<u64> {
    let value = headers
        .get(TOTAL_COUNT)
        .ok_or_else(|| LensError::InvalidHeader("missing Total-Count".into()))?;
    let text = value
        .to_str()
        .map_err(|_| LensError::InvalidHeader("non-ASCII Total-Count".into()))?;
    text.trim()
        .parse::<u64>()
        .map_err(|_| LensError::InvalidHeader(format!("Total-Count is not a count: {:?}", text)))
}
