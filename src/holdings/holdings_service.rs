//! Holdings CRUD and profit recomputation

use chrono::NaiveDate;
use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::Result;
use crate::holdings::fees::{compute_shares, daily_trailing_fee};
use crate::holdings::holdings_model::{
    HoldingRecord, HoldingValuation, NewHolding, ShareClass,
};
use crate::holdings::holdings_repository::HoldingsRepositoryTrait;
use crate::market::FundEstimate;

pub struct HoldingsService {
    repository: Arc<dyn HoldingsRepositoryTrait>,
}

impl HoldingsService {
    pub fn new(repository: Arc<dyn HoldingsRepositoryTrait>) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Result<Vec<HoldingRecord>> {
        Ok(self.repository.list()?)
    }

    pub fn get(&self, id: &str) -> Result<Option<HoldingRecord>> {
        Ok(self.repository.get(id)?)
    }

    pub fn create(&self, new: NewHolding) -> Result<HoldingRecord> {
        let shares = compute_shares(
            new.amount,
            new.purchase_nav,
            new.share_class,
            new.front_load_rate,
        )?;

        let record = HoldingRecord {
            id: Uuid::new_v4().to_string(),
            fund_code: new.fund_code,
            fund_name: new.fund_name,
            share_class: new.share_class,
            amount: new.amount,
            purchase_nav: new.purchase_nav,
            shares,
            purchase_date: new.purchase_date,
            front_load_rate: new.front_load_rate,
            trailing_annual_rate: new.trailing_annual_rate,
            accrued_trailing_fees: Decimal::ZERO,
            last_fee_date: None,
        };

        self.repository.save(&record)?;
        Ok(record)
    }

    /// Update an edited holding; shares are rederived from the edited
    /// amount/NAV/fee fields, never trusted from the caller
    pub fn update(&self, mut record: HoldingRecord) -> Result<HoldingRecord> {
        record.shares = compute_shares(
            record.amount,
            record.purchase_nav,
            record.share_class,
            record.front_load_rate,
        )?;
        self.repository.save(&record)?;
        Ok(record)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.repository.delete(id)?)
    }

    /// Accrue one daily trailing fee per C-class holding, at most once per
    /// calendar day. Returns how many holdings accrued.
    pub fn accrue_trailing_fees(
        &self,
        today: NaiveDate,
        nav_by_code: &HashMap<String, Decimal>,
    ) -> Result<usize> {
        let mut accrued = 0;
        for mut record in self.repository.list()? {
            if record.share_class != ShareClass::TrailingFee {
                continue;
            }
            if record.last_fee_date == Some(today) {
                continue;
            }
            let nav = match nav_by_code.get(&record.fund_code) {
                Some(nav) => *nav,
                None => continue,
            };

            let fee = daily_trailing_fee(record.shares, nav, record.trailing_annual_rate);
            if fee > Decimal::ZERO {
                debug!(
                    "Accruing trailing fee {} for holding {} ({})",
                    fee, record.id, record.fund_code
                );
                record.accrued_trailing_fees += fee;
            }
            record.last_fee_date = Some(today);
            self.repository.save(&record)?;
            accrued += 1;
        }
        Ok(accrued)
    }

    /// Recompute derived valuations against the latest estimates. Pure over
    /// its inputs; nothing here is persisted.
    pub fn revalue(
        &self,
        holdings: &[HoldingRecord],
        estimates: &HashMap<String, FundEstimate>,
    ) -> Vec<HoldingValuation> {
        holdings
            .iter()
            .map(|h| Self::revalue_one(h, estimates.get(&h.fund_code)))
            .collect()
    }

    fn revalue_one(
        holding: &HoldingRecord,
        estimate: Option<&FundEstimate>,
    ) -> HoldingValuation {
        let round = |v: Decimal| {
            v.round_dp_with_strategy(
                DISPLAY_DECIMAL_PRECISION,
                RoundingStrategy::MidpointAwayFromZero,
            )
        };

        match estimate {
            Some(est) => {
                let price = est.current_price();
                let market_value = holding.shares * price;

                // A zero-defaulted estimate (malformed upstream payload) is
                // not a live price: value at the last close with no intraday
                // figures, same as current_price() falls back
                let live = est.estimate > Decimal::ZERO;

                let today_fee = match holding.share_class {
                    ShareClass::TrailingFee if live => {
                        daily_trailing_fee(holding.shares, price, holding.trailing_annual_rate)
                    }
                    _ => Decimal::ZERO,
                };

                let today_profit = if live {
                    holding.shares * (est.estimate - est.last_nav) - today_fee
                } else {
                    Decimal::ZERO
                };

                HoldingValuation {
                    holding_id: holding.id.clone(),
                    fund_code: holding.fund_code.clone(),
                    market_value: round(market_value),
                    cost: holding.amount,
                    profit: round(
                        market_value - holding.amount - holding.accrued_trailing_fees,
                    ),
                    today_profit: round(today_profit),
                    today_fee,
                    priced_by_estimate: live,
                }
            }
            // No estimate at all: value at the purchase NAV so the row still
            // renders, with no intraday figures
            None => {
                let market_value = holding.shares * holding.purchase_nav;
                HoldingValuation {
                    holding_id: holding.id.clone(),
                    fund_code: holding.fund_code.clone(),
                    market_value: round(market_value),
                    cost: holding.amount,
                    profit: round(
                        market_value - holding.amount - holding.accrued_trailing_fees,
                    ),
                    today_profit: Decimal::ZERO,
                    today_fee: Decimal::ZERO,
                    priced_by_estimate: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holdings::holdings_repository::HoldingsRepository;
    use crate::storage::MemoryKvStore;
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    fn service() -> HoldingsService {
        HoldingsService::new(Arc::new(HoldingsRepository::new(Arc::new(
            MemoryKvStore::new(),
        ))))
    }

    fn new_holding(code: &str, class: ShareClass) -> NewHolding {
        NewHolding {
            fund_code: code.to_string(),
            fund_name: "Test Fund".to_string(),
            share_class: class,
            amount: dec!(1000),
            purchase_nav: dec!(1.25),
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            front_load_rate: Decimal::ZERO,
            trailing_annual_rate: dec!(0.4),
        }
    }

    fn estimate(code: &str, est: Decimal, last: Decimal) -> FundEstimate {
        FundEstimate {
            fund_code: code.to_string(),
            name: "Test Fund".to_string(),
            nav_date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
            last_nav: last,
            estimate: est,
            change_pct: Decimal::ZERO,
            estimate_time: NaiveDateTime::parse_from_str(
                "2024-01-15 14:30",
                "%Y-%m-%d %H:%M",
            )
            .unwrap(),
        }
    }

    #[test]
    fn test_create_computes_shares() {
        let svc = service();
        let record = svc.create(new_holding("110022", ShareClass::TrailingFee)).unwrap();
        assert_eq!(record.shares, dec!(800));
        assert_eq!(svc.list().unwrap().len(), 1);
    }

    #[test]
    fn test_update_rederives_shares() {
        let svc = service();
        let mut record = svc.create(new_holding("110022", ShareClass::TrailingFee)).unwrap();

        record.amount = dec!(2000);
        record.shares = dec!(1); // stale caller value must be ignored
        let updated = svc.update(record).unwrap();
        assert_eq!(updated.shares, dec!(1600));
    }

    #[test]
    fn test_revalue_with_estimate() {
        let svc = service();
        let record = svc.create(new_holding("110022", ShareClass::FrontLoad)).unwrap();

        let mut estimates = HashMap::new();
        estimates.insert("110022".to_string(), estimate("110022", dec!(1.30), dec!(1.28)));

        let valuations = svc.revalue(&[record], &estimates);
        assert_eq!(valuations.len(), 1);
        let v = &valuations[0];

        // 800 shares at 1.30
        assert_eq!(v.market_value, dec!(1040.00));
        assert_eq!(v.profit, dec!(40.00));
        // 800 * (1.30 - 1.28), no fee for front-load class
        assert_eq!(v.today_profit, dec!(16.00));
        assert_eq!(v.today_fee, Decimal::ZERO);
        assert!(v.priced_by_estimate);
    }

    #[test]
    fn test_revalue_trailing_class_deducts_today_fee() {
        let svc = service();
        let record = svc.create(new_holding("110022", ShareClass::TrailingFee)).unwrap();

        let mut estimates = HashMap::new();
        estimates.insert("110022".to_string(), estimate("110022", dec!(1.30), dec!(1.28)));

        let v = &svc.revalue(&[record], &estimates)[0];
        // 800 * 1.30 * 0.4% / 365 = 0.0114, above the floor, rounds to 0.01
        assert_eq!(v.today_fee, dec!(0.01));
        assert_eq!(v.today_profit, dec!(15.99));
    }

    #[test]
    fn test_revalue_with_zero_defaulted_estimate_has_no_intraday_figures() {
        let svc = service();
        let record = svc.create(new_holding("110022", ShareClass::TrailingFee)).unwrap();

        // Malformed upstream payload: estimate zero-defaulted, last close intact
        let mut estimates = HashMap::new();
        estimates.insert(
            "110022".to_string(),
            estimate("110022", Decimal::ZERO, dec!(1.28)),
        );

        let v = &svc.revalue(&[record], &estimates)[0];
        // Valued at the last close, not treated as an intraday crash to zero
        assert_eq!(v.market_value, dec!(1024.00));
        assert_eq!(v.today_profit, Decimal::ZERO);
        assert_eq!(v.today_fee, Decimal::ZERO);
        assert!(!v.priced_by_estimate);
    }

    #[test]
    fn test_revalue_without_estimate_uses_purchase_nav() {
        let svc = service();
        let record = svc.create(new_holding("110022", ShareClass::TrailingFee)).unwrap();

        let v = &svc.revalue(&[record], &HashMap::new())[0];
        assert_eq!(v.market_value, dec!(1000.00));
        assert_eq!(v.profit, dec!(0.00));
        assert_eq!(v.today_profit, Decimal::ZERO);
        assert!(!v.priced_by_estimate);
    }

    #[test]
    fn test_accrual_is_once_per_day() {
        let svc = service();
        svc.create(new_holding("110022", ShareClass::TrailingFee)).unwrap();

        let mut navs = HashMap::new();
        navs.insert("110022".to_string(), dec!(1.28));
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        assert_eq!(svc.accrue_trailing_fees(today, &navs).unwrap(), 1);
        // Second call on the same day is a no-op
        assert_eq!(svc.accrue_trailing_fees(today, &navs).unwrap(), 0);

        let record = &svc.list().unwrap()[0];
        // 800 * 1.28 * 0.4% / 365 = 0.0112 -> 0.01
        assert_eq!(record.accrued_trailing_fees, dec!(0.01));
        assert_eq!(record.last_fee_date, Some(today));
    }

    #[test]
    fn test_front_load_holdings_do_not_accrue() {
        let svc = service();
        svc.create(new_holding("110022", ShareClass::FrontLoad)).unwrap();

        let mut navs = HashMap::new();
        navs.insert("110022".to_string(), dec!(1.28));
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        assert_eq!(svc.accrue_trailing_fees(today, &navs).unwrap(), 0);
    }
}
