//! Scripted in-memory [`ItemSource`] for pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::api::{ItemPage, ItemSource, RawItem};
use crate::app::{LensError, Result};
use crate::domain::Credential;

#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Reject(u16),
    Transport,
    BadHeader,
}

impl<T: Clone> Reply<T> {
    fn into_result(self, url: &str) -> Result<T> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::Reject(status) => Err(LensError::Rejected {
                status,
                url: url.to_string(),
            }),
            Reply::Transport => Err(LensError::Transport(Box::new(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "operation timed out",
            )))),
            Reply::BadHeader => Err(LensError::InvalidHeader("missing Total-Count".into())),
        }
    }
}

#[derive(Default)]
pub struct ScriptedSource {
    pages: Vec<Reply<ItemPage>>,
    stocks: HashMap<String, Reply<u64>>,
    pub page_calls: Mutex<Vec<u32>>,
    pub per_page_calls: Mutex<Vec<u32>>,
    pub stock_calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, reply: Reply<ItemPage>) -> Self {
        self.pages.push(reply);
        self
    }

    pub fn stock(mut self, item_id: &str, reply: Reply<u64>) -> Self {
        self.stocks.insert(item_id.to_string(), reply);
        self
    }

    pub fn page_call_count(&self) -> usize {
        self.page_calls.lock().unwrap().len()
    }

    pub fn stock_call_count(&self) -> usize {
        self.stock_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ItemSource for ScriptedSource {
    async fn list_page(
        &self,
        _credential: &Credential,
        page: u32,
        per_page: u32,
    ) -> Result<ItemPage> {
        self.page_calls.lock().unwrap().push(page);
        self.per_page_calls.lock().unwrap().push(per_page);
        let url = format!("https://test.invalid/authenticated_user/items?page={}", page);
        match self.pages.get(page as usize - 1) {
            Some(reply) => reply.clone().into_result(&url),
            None => panic!("unscripted page {} requested", page),
        }
    }

    async fn stocker_count(&self, _credential: &Credential, item_id: &str) -> Result<u64> {
        self.stock_calls.lock().unwrap().push(item_id.to_string());
        let url = format!("https://test.invalid/items/{}/stockers", item_id);
        self.stocks
            .get(item_id)
            .cloned()
            .unwrap_or(Reply::Ok(0))
            .into_result(&url)
    }
}

pub fn raw_item(id: &str, created_at: &str, likes: u64) -> RawItem {
    serde_json::from_value(json!({
        "id": id,
        "title": format!("Article {}", id),
        "url": format!("https://qiita.com/someone/items/{}", id),
        "created_at": created_at,
        "likes_count": likes,
        "page_views_count": null,
        "private": false,
        "tags": [{"name": "Rust", "versions": []}],
    }))
    .unwrap()
}

/// A page of `count` items with ids `{prefix}-{n}`.
pub fn page_of(prefix: &str, count: usize, has_next: bool) -> Reply<ItemPage> {
    let items = (0..count)
        .map(|n| raw_item(&format!("{}-{}", prefix, n), "2024-01-15T10:00:00+09:00", 1))
        .collect();
    Reply::Ok(ItemPage { items, has_next })
}
