use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fee structure of the held share class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShareClass {
    /// A/B-style: purchase fee deducted up front, no ongoing fee
    FrontLoad,
    /// C-style: no purchase fee, ongoing trailing fee accrued daily
    TrailingFee,
}

/// A user-entered holding, persisted under the `holdings` blob.
///
/// `shares` is derived from amount, purchase NAV and the deducted front-load
/// fee; it is recomputed on every edit rather than constrained. Derived
/// valuation fields live in [`HoldingValuation`] and are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRecord {
    pub id: String,
    pub fund_code: String,
    pub fund_name: String,
    pub share_class: ShareClass,
    /// Purchase amount (gross, before any front-load deduction)
    pub amount: Decimal,
    /// NAV at purchase
    pub purchase_nav: Decimal,
    /// Computed shares
    pub shares: Decimal,
    pub purchase_date: NaiveDate,
    /// Front-load fee rate in percent, front-load class only
    #[serde(default)]
    pub front_load_rate: Decimal,
    /// Annual trailing fee rate in percent, trailing class only
    #[serde(default)]
    pub trailing_annual_rate: Decimal,
    /// Trailing fees accrued so far
    #[serde(default)]
    pub accrued_trailing_fees: Decimal,
    /// Last day a trailing fee was accrued, guards double accrual
    #[serde(default)]
    pub last_fee_date: Option<NaiveDate>,
}

/// Input for creating a holding through the form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    pub fund_code: String,
    pub fund_name: String,
    pub share_class: ShareClass,
    pub amount: Decimal,
    pub purchase_nav: Decimal,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub front_load_rate: Decimal,
    #[serde(default)]
    pub trailing_annual_rate: Decimal,
}

/// Transient per-holding valuation, recomputed on every estimate refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub holding_id: String,
    pub fund_code: String,
    /// shares × (current estimate, else last close, else purchase NAV)
    pub market_value: Decimal,
    /// Original purchase amount
    pub cost: Decimal,
    /// market value − cost − accrued trailing fees
    pub profit: Decimal,
    /// shares × (estimate − last close) − today's trailing fee;
    /// zero when no live estimate is available
    pub today_profit: Decimal,
    /// Today's trailing fee, trailing class only
    pub today_fee: Decimal,
    /// Whether a live estimate (vs a fallback price) was used
    pub priced_by_estimate: bool,
}
