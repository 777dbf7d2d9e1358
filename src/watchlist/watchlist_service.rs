//! Tracked fund codes
//!
//! An ordered, de-duplicated list under the `watchlist` key. This list is
//! what bounds the cache key space and drives the polling batch.

use std::sync::Arc;

use crate::constants::WATCHLIST_KEY;
use crate::errors::{Result, ValidationError};
use crate::storage::{KvStore, KvStoreExt};

pub struct WatchlistService {
    store: Arc<dyn KvStore>,
}

impl WatchlistService {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .get_json::<Vec<String>>(WATCHLIST_KEY)?
            .unwrap_or_default())
    }

    pub fn contains(&self, fund_code: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|c| c == fund_code))
    }

    /// Append a fund code; returns false when it was already tracked
    pub fn add(&self, fund_code: &str) -> Result<bool> {
        let code = fund_code.trim();
        if code.is_empty() {
            return Err(ValidationError::MissingField("fundCode".to_string()).into());
        }

        let mut codes = self.list()?;
        if codes.iter().any(|c| c == code) {
            return Ok(false);
        }
        codes.push(code.to_string());
        self.store.set_json(WATCHLIST_KEY, &codes)?;
        Ok(true)
    }

    pub fn remove(&self, fund_code: &str) -> Result<bool> {
        let mut codes = self.list()?;
        let before = codes.len();
        codes.retain(|c| c != fund_code);
        if codes.len() == before {
            return Ok(false);
        }
        self.store.set_json(WATCHLIST_KEY, &codes)?;
        Ok(true)
    }
}
