use std::sync::Arc;

use crate::alerts::alerts_model::AlertRule;
use crate::constants::ALERT_RULES_KEY;
use crate::storage::{KvStore, KvStoreExt, StorageError};

pub trait AlertsRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<AlertRule>, StorageError>;
    fn save(&self, rule: &AlertRule) -> Result<(), StorageError>;
    fn delete(&self, id: &str) -> Result<bool, StorageError>;
}

/// Alert rules persisted as one JSON blob under the `alert_rules` key
pub struct AlertsRepository {
    store: Arc<dyn KvStore>,
}

impl AlertsRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }
}

impl AlertsRepositoryTrait for AlertsRepository {
    fn list(&self) -> Result<Vec<AlertRule>, StorageError> {
        Ok(self
            .store
            .get_json::<Vec<AlertRule>>(ALERT_RULES_KEY)?
            .unwrap_or_default())
    }

    fn save(&self, rule: &AlertRule) -> Result<(), StorageError> {
        let mut rules = self.list()?;
        match rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule.clone(),
            None => rules.push(rule.clone()),
        }
        self.store.set_json(ALERT_RULES_KEY, &rules)
    }

    fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let mut rules = self.list()?;
        let before = rules.len();
        rules.retain(|r| r.id != id);
        if rules.len() == before {
            return Ok(false);
        }
        self.store.set_json(ALERT_RULES_KEY, &rules)?;
        Ok(true)
    }
}
