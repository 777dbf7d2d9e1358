use std::sync::Arc;

use crate::constants::TRANSACTIONS_KEY;
use crate::storage::{KvStore, KvStoreExt, StorageError};
use crate::transactions::transactions_model::TransactionRecord;

pub trait TransactionsRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<TransactionRecord>, StorageError>;
    fn append(&self, record: &TransactionRecord) -> Result<(), StorageError>;
    fn delete(&self, id: &str) -> Result<bool, StorageError>;
    fn is_empty(&self) -> Result<bool, StorageError>;
}

/// Transaction log persisted as one JSON blob under the `transactions` key
pub struct TransactionsRepository {
    store: Arc<dyn KvStore>,
}

impl TransactionsRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }
}

impl TransactionsRepositoryTrait for TransactionsRepository {
    fn list(&self) -> Result<Vec<TransactionRecord>, StorageError> {
        Ok(self
            .store
            .get_json::<Vec<TransactionRecord>>(TRANSACTIONS_KEY)?
            .unwrap_or_default())
    }

    fn append(&self, record: &TransactionRecord) -> Result<(), StorageError> {
        let mut records = self.list()?;
        records.push(record.clone());
        self.store.set_json(TRANSACTIONS_KEY, &records)
    }

    fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.store.set_json(TRANSACTIONS_KEY, &records)?;
        Ok(true)
    }

    fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.list()?.is_empty())
    }
}
