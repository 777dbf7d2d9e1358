//! Market data facade
//!
//! Coordinates the HTTP client with the two cache tiers. Every read follows
//! the same policy: outside trading hours serve the persisted snapshot
//! without fetching; during trading hours serve the memory TTL cache, then
//! fetch, and fall back to the snapshot when the fetch fails. Callers see
//! stale data or an error they can render as empty/loading, never a retry
//! loop.

use async_trait::async_trait;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{is_trading_now, SnapshotStore, TtlCache};
use crate::constants::{
    ESTIMATE_TTL, HISTORY_TTL, RANKING_TTL, SHOWN_ANNOUNCEMENTS_KEY,
};
use crate::market::eastmoney_client::{EastmoneyClient, RankingSort};
use crate::market::market_errors::MarketError;
use crate::market::market_model::{Announcement, FundEstimate, NetValueRecord, RankingEntry};
use crate::storage::{KvStore, KvStoreExt, StorageError};

/// NAV history page size used for charting and period returns; enough for a
/// full year of trading days plus slack
const HISTORY_PAGE_SIZE: u32 = 400;

#[async_trait]
pub trait MarketServiceTrait: Send + Sync {
    async fn get_estimate(&self, fund_code: &str) -> Result<FundEstimate, MarketError>;

    /// Batch refresh for a watchlist; funds that cannot be resolved at all
    /// are absent from the result, the batch itself never fails.
    async fn get_estimates(&self, fund_codes: &[String]) -> HashMap<String, FundEstimate>;

    async fn get_nav_history(&self, fund_code: &str) -> Result<Vec<NetValueRecord>, MarketError>;

    async fn get_rankings(&self, sort: RankingSort) -> Result<Vec<RankingEntry>, MarketError>;

    async fn get_announcements(&self, fund_code: &str) -> Result<Vec<Announcement>, MarketError>;
}

pub struct MarketService {
    client: EastmoneyClient,
    estimate_cache: TtlCache<FundEstimate>,
    history_cache: TtlCache<Vec<NetValueRecord>>,
    ranking_cache: TtlCache<Vec<RankingEntry>>,
    snapshots: SnapshotStore,
}

impl MarketService {
    pub fn new(client: EastmoneyClient, store: Arc<dyn KvStore>) -> Self {
        Self {
            client,
            estimate_cache: TtlCache::new(),
            history_cache: TtlCache::new(),
            ranking_cache: TtlCache::new(),
            snapshots: SnapshotStore::new(store),
        }
    }

    fn estimate_fallback(
        &self,
        fund_code: &str,
        err: MarketError,
    ) -> Result<FundEstimate, MarketError> {
        match self.snapshots.get::<FundEstimate>("estimate", fund_code) {
            Some(snapshot) => {
                warn!(
                    "Estimate fetch failed for {}, serving snapshot: {}",
                    fund_code, err
                );
                Ok(snapshot)
            }
            None => Err(err),
        }
    }
}

#[async_trait]
impl MarketServiceTrait for MarketService {
    async fn get_estimate(&self, fund_code: &str) -> Result<FundEstimate, MarketError> {
        if !is_trading_now() {
            if let Some(snapshot) = self.snapshots.get::<FundEstimate>("estimate", fund_code) {
                debug!("Market closed, serving estimate snapshot for {}", fund_code);
                return Ok(snapshot);
            }
        }

        if let Some(hit) = self.estimate_cache.get(fund_code).await {
            return Ok(hit);
        }

        match self.client.get_estimate(fund_code).await {
            Ok(estimate) => {
                self.estimate_cache
                    .insert(fund_code, estimate.clone(), ESTIMATE_TTL)
                    .await;
                self.snapshots.put("estimate", fund_code, &estimate);
                Ok(estimate)
            }
            Err(e) => self.estimate_fallback(fund_code, e),
        }
    }

    async fn get_estimates(&self, fund_codes: &[String]) -> HashMap<String, FundEstimate> {
        let fetches = fund_codes.iter().map(|code| async move {
            (code.clone(), self.get_estimate(code).await)
        });

        let mut estimates = HashMap::new();
        for (code, result) in futures::future::join_all(fetches).await {
            match result {
                Ok(estimate) => {
                    estimates.insert(code, estimate);
                }
                Err(e) => warn!("Skipping estimate for {}: {}", code, e),
            }
        }
        estimates
    }

    async fn get_nav_history(&self, fund_code: &str) -> Result<Vec<NetValueRecord>, MarketError> {
        if let Some(hit) = self.history_cache.get(fund_code).await {
            return Ok(hit);
        }

        match self
            .client
            .get_nav_history(fund_code, 1, HISTORY_PAGE_SIZE)
            .await
        {
            Ok(records) => {
                self.history_cache
                    .insert(fund_code, records.clone(), HISTORY_TTL)
                    .await;
                self.snapshots.put("history", fund_code, &records);
                Ok(records)
            }
            Err(e) => match self.snapshots.get::<Vec<NetValueRecord>>("history", fund_code) {
                Some(snapshot) => {
                    warn!(
                        "NAV history fetch failed for {}, serving snapshot: {}",
                        fund_code, e
                    );
                    Ok(snapshot)
                }
                None => Err(e),
            },
        }
    }

    async fn get_rankings(&self, sort: RankingSort) -> Result<Vec<RankingEntry>, MarketError> {
        let cache_key = sort.as_param();

        if let Some(hit) = self.ranking_cache.get(cache_key).await {
            return Ok(hit);
        }

        match self.client.get_rankings(sort, 100).await {
            Ok(entries) => {
                self.ranking_cache
                    .insert(cache_key, entries.clone(), RANKING_TTL)
                    .await;
                self.snapshots.put("rankings", cache_key, &entries);
                Ok(entries)
            }
            Err(e) => match self.snapshots.get::<Vec<RankingEntry>>("rankings", cache_key) {
                Some(snapshot) => {
                    warn!("Rankings fetch failed, serving snapshot: {}", e);
                    Ok(snapshot)
                }
                None => Err(e),
            },
        }
    }

    async fn get_announcements(&self, fund_code: &str) -> Result<Vec<Announcement>, MarketError> {
        self.client.get_announcements(fund_code).await
    }
}

/// Tracks which announcement ids have already been surfaced to the user
pub struct AnnouncementTracker {
    store: Arc<dyn KvStore>,
}

impl AnnouncementTracker {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn shown_ids(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .store
            .get_json::<Vec<String>>(SHOWN_ANNOUNCEMENTS_KEY)?
            .unwrap_or_default())
    }

    pub fn is_shown(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.shown_ids()?.iter().any(|s| s == id))
    }

    pub fn mark_shown(&self, id: &str) -> Result<(), StorageError> {
        let mut ids = self.shown_ids()?;
        if !ids.iter().any(|s| s == id) {
            ids.push(id.to_string());
            self.store.set_json(SHOWN_ANNOUNCEMENTS_KEY, &ids)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKvStore;

    #[test]
    fn test_announcement_tracker() {
        let tracker = AnnouncementTracker::new(Arc::new(MemoryKvStore::new()));

        assert!(!tracker.is_shown("AN1").unwrap());
        tracker.mark_shown("AN1").unwrap();
        tracker.mark_shown("AN1").unwrap();

        assert!(tracker.is_shown("AN1").unwrap());
        assert_eq!(tracker.shown_ids().unwrap(), vec!["AN1".to_string()]);
    }
}
