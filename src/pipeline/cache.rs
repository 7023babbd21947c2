//! Session caches for the pipeline.
//!
//! Both caches key on [`Credential::fingerprint`], never on the raw token.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Credential, Item};

/// Collected item snapshots, one per credential.
#[derive(Default)]
pub struct SnapshotCache {
    entries: Mutex<HashMap<String, Arc<[Item]>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, credential: &Credential) -> Option<Arc<[Item]>> {
        self.entries
            .lock()
            .await
            .get(credential.fingerprint())
            .cloned()
    }

    pub async fn insert(&self, credential: &Credential, snapshot: Arc<[Item]>) {
        self.entries
            .lock()
            .await
            .insert(credential.fingerprint().to_string(), snapshot);
    }

    /// Returns whether an entry was dropped.
    pub async fn invalidate(&self, credential: &Credential) -> bool {
        self.entries
            .lock()
            .await
            .remove(credential.fingerprint())
            .is_some()
    }
}

/// Measured stock counts keyed by `(item id, credential)`.
#[derive(Default)]
pub struct StockCache {
    entries: Mutex<HashMap<(String, String), u64>>,
}

impl StockCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, item_id: &str, credential: &Credential) -> Option<u64> {
        self.entries
            .lock()
            .await
            .get(&(item_id.to_string(), credential.fingerprint().to_string()))
            .copied()
    }

    pub async fn insert(&self, item_id: &str, credential: &Credential, count: u64) {
        self.entries.lock().await.insert(
            (item_id.to_string(), credential.fingerprint().to_string()),
            count,
        );
    }

    /// Drop every count measured with `credential`; returns how many went.
    pub async fn invalidate(&self, credential: &Credential) -> usize {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|(_, fingerprint), _| fingerprint != credential.fingerprint());
        before - entries.len()
    }
}
