//! Persisted last-good-value tier
//!
//! The second cache tier: the last successfully fetched value per
//! (kind, fund code), kept indefinitely in device storage. Served when the
//! market is closed or a live fetch fails.

use chrono::{Local, NaiveDateTime};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::storage::{KvStore, KvStoreExt};

/// A persisted value with the time it was fetched
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<T> {
    pub value: T,
    pub fetched_at: NaiveDateTime,
}

pub struct SnapshotStore {
    store: Arc<dyn KvStore>,
}

impl SnapshotStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn key(kind: &str, code: &str) -> String {
        format!("snapshot:{}:{}", kind, code)
    }

    /// Last persisted value, if any. Storage failures degrade to a miss.
    pub fn get<T: DeserializeOwned>(&self, kind: &str, code: &str) -> Option<T> {
        match self.store.get_json::<Snapshot<T>>(&Self::key(kind, code)) {
            Ok(snapshot) => snapshot.map(|s| s.value),
            Err(e) => {
                warn!("Failed to read {} snapshot for {}: {}", kind, code, e);
                None
            }
        }
    }

    pub fn fetched_at(&self, kind: &str, code: &str) -> Option<NaiveDateTime> {
        self.store
            .get_json::<Snapshot<serde_json::Value>>(&Self::key(kind, code))
            .ok()
            .flatten()
            .map(|s| s.fetched_at)
    }

    /// Persist the latest good value. Failures are logged, never propagated:
    /// a broken snapshot tier must not fail a successful live fetch.
    pub fn put<T: Serialize>(&self, kind: &str, code: &str, value: &T) {
        let snapshot = Snapshot {
            value,
            fetched_at: Local::now().naive_local(),
        };
        if let Err(e) = self.store.set_json(&Self::key(kind, code), &snapshot) {
            warn!("Failed to persist {} snapshot for {}: {}", kind, code, e);
        }
    }
}
