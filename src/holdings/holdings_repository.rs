use std::sync::Arc;

use crate::constants::HOLDINGS_KEY;
use crate::holdings::holdings_model::HoldingRecord;
use crate::storage::{KvStore, KvStoreExt, StorageError};

pub trait HoldingsRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<HoldingRecord>, StorageError>;
    fn get(&self, id: &str) -> Result<Option<HoldingRecord>, StorageError>;
    /// Insert or replace by id
    fn save(&self, record: &HoldingRecord) -> Result<(), StorageError>;
    fn delete(&self, id: &str) -> Result<bool, StorageError>;
}

/// Holdings persisted as one JSON blob under the `holdings` key
pub struct HoldingsRepository {
    store: Arc<dyn KvStore>,
}

impl HoldingsRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn write_all(&self, records: &[HoldingRecord]) -> Result<(), StorageError> {
        self.store.set_json(HOLDINGS_KEY, &records)
    }
}

impl HoldingsRepositoryTrait for HoldingsRepository {
    fn list(&self) -> Result<Vec<HoldingRecord>, StorageError> {
        Ok(self
            .store
            .get_json::<Vec<HoldingRecord>>(HOLDINGS_KEY)?
            .unwrap_or_default())
    }

    fn get(&self, id: &str) -> Result<Option<HoldingRecord>, StorageError> {
        Ok(self.list()?.into_iter().find(|r| r.id == id))
    }

    fn save(&self, record: &HoldingRecord) -> Result<(), StorageError> {
        let mut records = self.list()?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        self.write_all(&records)
    }

    fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records)?;
        Ok(true)
    }
}
