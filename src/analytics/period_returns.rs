//! Period-return computation over NAV history
//!
//! For each lookback window the base point is the nearest record dated at or
//! before (as_of − window). Windows with no qualifying record are omitted
//! from the result — a fund younger than a year simply has no 1y return,
//! which is not the same thing as 0.00%.

use chrono::{Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::market::NetValueRecord;

/// Fixed trailing windows shown in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LookbackWindow {
    OneWeek,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl LookbackWindow {
    pub const ALL: [LookbackWindow; 5] = [
        LookbackWindow::OneWeek,
        LookbackWindow::OneMonth,
        LookbackWindow::ThreeMonths,
        LookbackWindow::SixMonths,
        LookbackWindow::OneYear,
    ];

    pub fn days(&self) -> i64 {
        match self {
            LookbackWindow::OneWeek => 7,
            LookbackWindow::OneMonth => 30,
            LookbackWindow::ThreeMonths => 90,
            LookbackWindow::SixMonths => 180,
            LookbackWindow::OneYear => 365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LookbackWindow::OneWeek => "1w",
            LookbackWindow::OneMonth => "1m",
            LookbackWindow::ThreeMonths => "3m",
            LookbackWindow::SixMonths => "6m",
            LookbackWindow::OneYear => "1y",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReturn {
    pub window: LookbackWindow,
    pub change_pct: Decimal,
}

/// Compute trailing returns from `history`, which must be sorted ascending
/// by date (most recent last). The latest record is the comparison point for
/// every window.
pub fn period_returns(
    history: &[NetValueRecord],
    as_of: NaiveDate,
    windows: &[LookbackWindow],
) -> Vec<PeriodReturn> {
    let latest = match history.last() {
        Some(record) => record,
        None => return Vec::new(),
    };

    let mut results = Vec::with_capacity(windows.len());
    for window in windows {
        let target = as_of - Duration::days(window.days());

        // Nearest record at or before the target date
        let base = history.iter().rev().find(|r| r.date <= target);

        let base = match base {
            Some(b) if b.nav > Decimal::ZERO => b,
            // Short history (or a zero-defaulted NAV): omit, never zero-fill
            _ => continue,
        };

        let change_pct = ((latest.nav - base.nav) / base.nav * dec!(100)).round_dp_with_strategy(
            DISPLAY_DECIMAL_PRECISION,
            RoundingStrategy::MidpointAwayFromZero,
        );

        results.push(PeriodReturn {
            window: *window,
            change_pct,
        });
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(y: i32, m: u32, d: u32, nav: Decimal) -> NetValueRecord {
        NetValueRecord {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            nav,
            cumulative_nav: nav,
            change_pct: Decimal::ZERO,
        }
    }

    #[test]
    fn test_one_week_return() {
        // d0 = 2024-01-08, d7 = 2024-01-15
        let history = vec![
            record(2024, 1, 8, dec!(1.000)),
            record(2024, 1, 15, dec!(1.020)),
        ];
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let returns = period_returns(&history, as_of, &[LookbackWindow::OneWeek]);
        assert_eq!(returns.len(), 1);
        assert_eq!(returns[0].change_pct, dec!(2.00));
    }

    #[test]
    fn test_short_history_window_omitted() {
        let history = vec![
            record(2024, 1, 8, dec!(1.000)),
            record(2024, 1, 15, dec!(1.020)),
        ];
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let returns = period_returns(
            &history,
            as_of,
            &[LookbackWindow::OneWeek, LookbackWindow::OneMonth],
        );

        // 1m has no record 30 days back: omitted entirely, not reported as 0
        assert_eq!(returns.len(), 1);
        assert_eq!(returns[0].window, LookbackWindow::OneWeek);
    }

    #[test]
    fn test_nearest_prior_record_is_used() {
        // No record exactly 30 days back; the walk lands on the nearest
        // record at or before the target
        let history = vec![
            record(2023, 12, 1, dec!(1.000)),
            record(2023, 12, 10, dec!(1.100)),
            record(2024, 1, 15, dec!(1.210)),
        ];
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let returns = period_returns(&history, as_of, &[LookbackWindow::OneMonth]);
        // target = 2023-12-16, base = 2023-12-10 at 1.100
        assert_eq!(returns[0].change_pct, dec!(10.00));
    }

    #[test]
    fn test_record_exactly_at_target_qualifies() {
        let history = vec![
            record(2023, 12, 16, dec!(1.000)),
            record(2024, 1, 15, dec!(1.050)),
        ];
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let returns = period_returns(&history, as_of, &[LookbackWindow::OneMonth]);
        assert_eq!(returns[0].change_pct, dec!(5.00));
    }

    #[test]
    fn test_empty_history() {
        let returns = period_returns(
            &[],
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            &LookbackWindow::ALL,
        );
        assert!(returns.is_empty());
    }

    #[test]
    fn test_zero_base_nav_omitted() {
        let history = vec![
            record(2023, 12, 1, Decimal::ZERO),
            record(2024, 1, 15, dec!(1.050)),
        ];
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let returns = period_returns(&history, as_of, &[LookbackWindow::OneMonth]);
        assert!(returns.is_empty());
    }

    #[test]
    fn test_all_windows_on_long_history() {
        let mut history = Vec::new();
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        for i in 0..400 {
            let nav = dec!(1.0) + Decimal::from(i) * dec!(0.001);
            history.push(NetValueRecord {
                date: start + Duration::days(i),
                nav,
                cumulative_nav: nav,
                change_pct: Decimal::ZERO,
            });
        }
        let as_of = history.last().unwrap().date;

        let returns = period_returns(&history, as_of, &LookbackWindow::ALL);
        assert_eq!(returns.len(), LookbackWindow::ALL.len());
        // Monotonic navs: longer windows show larger returns
        for pair in returns.windows(2) {
            assert!(pair[1].change_pct > pair[0].change_pct);
        }
    }
}
