use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    Buy,
    Sell,
    Dividend,
    AutoInvest,
}

/// One entry of the local transaction log. The log is append-only apart
/// from explicit user deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    pub fund_code: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub shares: Decimal,
    pub nav: Decimal,
    pub fee: Decimal,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub fund_code: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub shares: Decimal,
    pub nav: Decimal,
    #[serde(default)]
    pub fee: Decimal,
    pub date: NaiveDate,
}
