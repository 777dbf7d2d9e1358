//! Alert rules
//!
//! Rules are local configuration evaluated against the latest estimate.
//! There is no scheduler here; the UI decides when to evaluate and how to
//! notify.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::market::FundEstimate;

/// What fires the alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "threshold", rename_all = "camelCase")]
pub enum AlertTrigger {
    /// Estimated change percent rises to or above the threshold
    ChangeUp(Decimal),
    /// Estimated change percent falls to or below minus the threshold
    ChangeDown(Decimal),
    /// Wall clock reaches the given time of day
    Time(NaiveTime),
    /// Estimated value rises to or above the threshold
    NavAbove(Decimal),
    /// Estimated value falls to or below the threshold
    NavBelow(Decimal),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRule {
    pub id: String,
    pub fund_code: String,
    pub trigger: AlertTrigger,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlertRule {
    pub fund_code: String,
    pub trigger: AlertTrigger,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Whether `rule` fires for `estimate` at wall-clock time `now`
pub fn rule_matches(rule: &AlertRule, estimate: &FundEstimate, now: NaiveTime) -> bool {
    if !rule.enabled || rule.fund_code != estimate.fund_code {
        return false;
    }

    match &rule.trigger {
        AlertTrigger::ChangeUp(threshold) => estimate.change_pct >= *threshold,
        AlertTrigger::ChangeDown(threshold) => estimate.change_pct <= -*threshold,
        AlertTrigger::Time(at) => now >= *at,
        AlertTrigger::NavAbove(threshold) => estimate.estimate >= *threshold,
        AlertTrigger::NavBelow(threshold) => {
            estimate.estimate > Decimal::ZERO && estimate.estimate <= *threshold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal_macros::dec;

    fn estimate(change_pct: Decimal, value: Decimal) -> FundEstimate {
        FundEstimate {
            fund_code: "110022".to_string(),
            name: "Test".to_string(),
            nav_date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
            last_nav: dec!(1.22),
            estimate: value,
            change_pct,
            estimate_time: NaiveDateTime::parse_from_str(
                "2024-01-15 14:30",
                "%Y-%m-%d %H:%M",
            )
            .unwrap(),
        }
    }

    fn rule(trigger: AlertTrigger) -> AlertRule {
        AlertRule {
            id: "r1".to_string(),
            fund_code: "110022".to_string(),
            trigger,
            enabled: true,
        }
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_change_triggers() {
        let up = rule(AlertTrigger::ChangeUp(dec!(2.0)));
        assert!(rule_matches(&up, &estimate(dec!(2.5), dec!(1.25)), noon()));
        assert!(!rule_matches(&up, &estimate(dec!(1.5), dec!(1.25)), noon()));

        let down = rule(AlertTrigger::ChangeDown(dec!(2.0)));
        assert!(rule_matches(&down, &estimate(dec!(-2.5), dec!(1.19)), noon()));
        assert!(!rule_matches(&down, &estimate(dec!(-1.5), dec!(1.20)), noon()));
    }

    #[test]
    fn test_nav_threshold_triggers() {
        let above = rule(AlertTrigger::NavAbove(dec!(1.30)));
        assert!(rule_matches(&above, &estimate(dec!(0.5), dec!(1.31)), noon()));
        assert!(!rule_matches(&above, &estimate(dec!(0.5), dec!(1.29)), noon()));

        let below = rule(AlertTrigger::NavBelow(dec!(1.20)));
        assert!(rule_matches(&below, &estimate(dec!(-0.5), dec!(1.19)), noon()));
        // A zero-defaulted estimate must not fire a below-threshold alert
        assert!(!rule_matches(&below, &estimate(dec!(0), Decimal::ZERO), noon()));
    }

    #[test]
    fn test_time_trigger() {
        let at_close = rule(AlertTrigger::Time(NaiveTime::from_hms_opt(14, 45, 0).unwrap()));
        assert!(!rule_matches(&at_close, &estimate(dec!(0), dec!(1.25)), noon()));
        assert!(rule_matches(
            &at_close,
            &estimate(dec!(0), dec!(1.25)),
            NaiveTime::from_hms_opt(14, 50, 0).unwrap()
        ));
    }

    #[test]
    fn test_disabled_and_wrong_fund() {
        let mut r = rule(AlertTrigger::ChangeUp(dec!(1.0)));
        r.enabled = false;
        assert!(!rule_matches(&r, &estimate(dec!(5.0), dec!(1.30)), noon()));

        let mut other = rule(AlertTrigger::ChangeUp(dec!(1.0)));
        other.fund_code = "161725".to_string();
        assert!(!rule_matches(&other, &estimate(dec!(5.0), dec!(1.30)), noon()));
    }
}
