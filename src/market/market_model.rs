//! Fund market data models
//!
//! Upstream payloads carry numbers and dates as strings, in more than one
//! format. Raw DTOs mirror the wire shape; conversion into domain types
//! defaults malformed or missing values to zero/empty instead of erroring,
//! so a partially broken response still renders.

use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Intraday valuation estimate for a fund.
///
/// Produced by the remote endpoint, read-only here. The estimate is
/// advisory, not authoritative; the official NAV arrives once daily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundEstimate {
    pub fund_code: String,
    pub name: String,
    /// Date of the last published official NAV
    pub nav_date: NaiveDate,
    /// Last published official NAV
    pub last_nav: Decimal,
    /// Current estimated value
    pub estimate: Decimal,
    /// Estimated change percent vs last NAV
    pub change_pct: Decimal,
    /// When the estimate was computed upstream
    pub estimate_time: NaiveDateTime,
}

impl FundEstimate {
    /// Price to value holdings at: the live estimate when present,
    /// otherwise the last official close
    pub fn current_price(&self) -> Decimal {
        if self.estimate > Decimal::ZERO {
            self.estimate
        } else {
            self.last_nav
        }
    }
}

/// One official NAV history record. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetValueRecord {
    pub date: NaiveDate,
    /// Official unit NAV
    pub nav: Decimal,
    /// Cumulative NAV (dividends included)
    pub cumulative_nav: Decimal,
    /// Daily change percent
    pub change_pct: Decimal,
}

/// One row of the fund rankings table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub fund_code: String,
    pub name: String,
    pub nav_date: Option<NaiveDate>,
    pub nav: Decimal,
    pub change_pct: Decimal,
    pub return_1w: Option<Decimal>,
    pub return_1m: Option<Decimal>,
    pub return_3m: Option<Decimal>,
    pub return_6m: Option<Decimal>,
    pub return_1y: Option<Decimal>,
}

/// A fund announcement (report publication, dividend notice, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub publish_date: Option<NaiveDate>,
}

/// Raw estimate payload inside the JSONP envelope
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatePayload {
    #[serde(rename = "fundcode")]
    pub fund_code: String,
    #[serde(default)]
    pub name: String,
    /// Last NAV date, "YYYY-MM-DD"
    #[serde(rename = "jzrq", default)]
    pub nav_date: String,
    /// Last official NAV
    #[serde(rename = "dwjz", default)]
    pub last_nav: String,
    /// Estimated value
    #[serde(rename = "gsz", default)]
    pub estimate: String,
    /// Estimated change percent
    #[serde(rename = "gszzl", default)]
    pub change_pct: String,
    /// Estimate timestamp, "YYYY-MM-DD HH:MM"
    #[serde(rename = "gztime", default)]
    pub estimate_time: String,
}

impl EstimatePayload {
    pub fn into_estimate(self) -> FundEstimate {
        FundEstimate {
            fund_code: self.fund_code,
            name: self.name,
            nav_date: parse_date(&self.nav_date)
                .unwrap_or_else(|| Local::now().date_naive()),
            last_nav: parse_decimal(&self.last_nav),
            estimate: parse_decimal(&self.estimate),
            change_pct: parse_decimal(&self.change_pct),
            estimate_time: NaiveDateTime::parse_from_str(&self.estimate_time, "%Y-%m-%d %H:%M")
                .unwrap_or_else(|_| Local::now().naive_local()),
        }
    }
}

/// Raw NAV history row
#[derive(Debug, Clone, Deserialize)]
pub struct NavHistoryRow {
    /// Date, "YYYY-MM-DD" or "YYYYMMDD"
    #[serde(rename = "FSRQ", default)]
    pub date: String,
    #[serde(rename = "DWJZ", default)]
    pub nav: String,
    #[serde(rename = "LJJZ", default)]
    pub cumulative_nav: String,
    #[serde(rename = "JZZZL", default)]
    pub change_pct: String,
}

impl NavHistoryRow {
    /// Normalize the date to YYYY-MM-DD
    pub fn normalized_date(&self) -> String {
        if !self.date.contains('-') && self.date.len() == 8 && self.date.is_ascii() {
            format!(
                "{}-{}-{}",
                &self.date[0..4],
                &self.date[4..6],
                &self.date[6..8]
            )
        } else {
            self.date.clone()
        }
    }

    /// Rows with unparseable dates are dropped; numeric fields default to zero
    pub fn into_record(self) -> Option<NetValueRecord> {
        let date = parse_date(&self.normalized_date())?;
        Some(NetValueRecord {
            date,
            nav: parse_decimal(&self.nav),
            cumulative_nav: parse_decimal(&self.cumulative_nav),
            change_pct: parse_decimal(&self.change_pct),
        })
    }
}

/// NAV history response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct NavHistoryResponse {
    #[serde(rename = "Data")]
    pub data: NavHistoryData,
    #[serde(rename = "TotalCount", default)]
    pub total_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NavHistoryData {
    #[serde(rename = "LSJZList", default)]
    pub list: Vec<NavHistoryRow>,
}

/// Announcement list response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct AnnouncementResponse {
    #[serde(rename = "Data", default)]
    pub data: Vec<AnnouncementRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnnouncementRow {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "TITLE", default)]
    pub title: String,
    #[serde(rename = "PUBLISHDATE", default)]
    pub publish_date: String,
}

impl AnnouncementRow {
    pub fn into_announcement(self) -> Announcement {
        // Publish dates sometimes arrive with a time suffix
        let date_part = self.publish_date.split_whitespace().next().unwrap_or("");
        Announcement {
            id: self.id,
            title: self.title,
            publish_date: parse_date(date_part),
        }
    }
}

/// Parse an upstream numeric string, defaulting to zero when malformed
pub(crate) fn parse_decimal(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

/// Parse a YYYY-MM-DD date string
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
