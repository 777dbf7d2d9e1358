//! Transaction log service

use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{Result, ValidationError};
use crate::holdings::fees::front_load_fee;
use crate::holdings::HoldingRecord;
use crate::transactions::transactions_model::{
    NewTransaction, TransactionKind, TransactionRecord,
};
use crate::transactions::transactions_repository::TransactionsRepositoryTrait;

pub struct TransactionsService {
    repository: Arc<dyn TransactionsRepositoryTrait>,
}

impl TransactionsService {
    pub fn new(repository: Arc<dyn TransactionsRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Log ordered oldest-first
    pub fn list(&self) -> Result<Vec<TransactionRecord>> {
        let mut records = self.repository.list()?;
        records.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(records)
    }

    pub fn record(&self, new: NewTransaction) -> Result<TransactionRecord> {
        if new.fund_code.trim().is_empty() {
            return Err(ValidationError::MissingField("fundCode".to_string()).into());
        }
        if new.amount < Decimal::ZERO {
            return Err(
                ValidationError::InvalidInput("amount must not be negative".to_string()).into(),
            );
        }

        let record = TransactionRecord {
            id: Uuid::new_v4().to_string(),
            fund_code: new.fund_code,
            kind: new.kind,
            amount: new.amount,
            shares: new.shares,
            nav: new.nav,
            fee: new.fee,
            date: new.date,
        };
        self.repository.append(&record)?;
        Ok(record)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.repository.delete(id)?)
    }

    /// Seed the log from existing holdings: one synthetic Buy per holding.
    /// Runs only while the log is empty, so calling it on every startup is
    /// safe. Returns the number of seeded entries.
    pub fn seed_from_holdings(&self, holdings: &[HoldingRecord]) -> Result<usize> {
        if !self.repository.is_empty()? {
            return Ok(0);
        }

        for holding in holdings {
            let record = TransactionRecord {
                id: Uuid::new_v4().to_string(),
                fund_code: holding.fund_code.clone(),
                kind: TransactionKind::Buy,
                amount: holding.amount,
                shares: holding.shares,
                nav: holding.purchase_nav,
                fee: front_load_fee(
                    holding.amount,
                    holding.share_class,
                    holding.front_load_rate,
                ),
                date: holding.purchase_date,
            };
            self.repository.append(&record)?;
        }

        debug!("Seeded transaction log from {} holdings", holdings.len());
        Ok(holdings.len())
    }
}
