use std::sync::Arc;
use uuid::Uuid;

use crate::alerts::alerts_model::{rule_matches, AlertRule, NewAlertRule};
use crate::alerts::alerts_repository::AlertsRepositoryTrait;
use crate::errors::{Result, ValidationError};
use crate::market::FundEstimate;

pub struct AlertsService {
    repository: Arc<dyn AlertsRepositoryTrait>,
}

impl AlertsService {
    pub fn new(repository: Arc<dyn AlertsRepositoryTrait>) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Result<Vec<AlertRule>> {
        Ok(self.repository.list()?)
    }

    pub fn create(&self, new: NewAlertRule) -> Result<AlertRule> {
        if new.fund_code.trim().is_empty() {
            return Err(ValidationError::MissingField("fundCode".to_string()).into());
        }

        let rule = AlertRule {
            id: Uuid::new_v4().to_string(),
            fund_code: new.fund_code,
            trigger: new.trigger,
            enabled: new.enabled,
        };
        self.repository.save(&rule)?;
        Ok(rule)
    }

    pub fn set_enabled(&self, id: &str, enabled: bool) -> Result<Option<AlertRule>> {
        let rule = self.repository.list()?.into_iter().find(|r| r.id == id);
        match rule {
            Some(mut rule) => {
                rule.enabled = enabled;
                self.repository.save(&rule)?;
                Ok(Some(rule))
            }
            None => Ok(None),
        }
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.repository.delete(id)?)
    }

    /// Rules that fire for the given estimate right now. One evaluation
    /// pass; once-per-day suppression is the caller's concern.
    pub fn matching_rules(
        &self,
        estimate: &FundEstimate,
        now: chrono::NaiveTime,
    ) -> Result<Vec<AlertRule>> {
        Ok(self
            .repository
            .list()?
            .into_iter()
            .filter(|rule| rule_matches(rule, estimate, now))
            .collect())
    }
}
