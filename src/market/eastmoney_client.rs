//! Eastmoney API client
//!
//! The valuation endpoint is JSONP: the response body is a `jsonpgz(...)`
//! envelope around a JSON object. The original consumer injected script tags
//! and matched a shared global callback; here each call is a plain HTTP GET
//! with its own future and the envelope is stripped locally, so there is no
//! shared callback state to reconcile.

use chrono::Local;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::constants::{ESTIMATE_TIMEOUT, HISTORY_TIMEOUT, MAX_CONCURRENT_REQUESTS};
use crate::market::market_errors::MarketError;
use crate::market::market_model::{
    Announcement, AnnouncementResponse, EstimatePayload, FundEstimate, NavHistoryResponse,
    NetValueRecord, RankingEntry,
};

const ESTIMATE_BASE_URL: &str = "https://fundgz.1234567.com.cn";
const DATA_BASE_URL: &str = "https://api.fund.eastmoney.com";
const RANKING_BASE_URL: &str = "https://fund.eastmoney.com";

lazy_static! {
    static ref JSONP_ENVELOPE: Regex =
        Regex::new(r"(?s)^\s*jsonpgz\((.*)\);?\s*$").expect("invalid JSONP regex");
    static ref RANK_DATAS: Regex =
        Regex::new(r"datas\s*:\s*\[(.*?)\]").expect("invalid rank regex");
    static ref RANK_ROW: Regex = Regex::new(r#""([^"]*)""#).expect("invalid rank row regex");
}

/// Sort field for the rankings endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingSort {
    DailyChange,
    OneWeek,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl RankingSort {
    pub fn as_param(&self) -> &'static str {
        match self {
            RankingSort::DailyChange => "rzdf",
            RankingSort::OneWeek => "zzf",
            RankingSort::OneMonth => "1yzf",
            RankingSort::ThreeMonths => "3yzf",
            RankingSort::SixMonths => "6yzf",
            RankingSort::OneYear => "1nzf",
        }
    }
}

/// HTTP client for the public fund endpoints
#[derive(Clone)]
pub struct EastmoneyClient {
    client: Client,
    /// Bounds simultaneous outbound requests; protection against upstream
    /// connection limits, not a scheduler
    limiter: Arc<Semaphore>,
    estimate_base: String,
    data_base: String,
    ranking_base: String,
}

impl EastmoneyClient {
    pub fn new() -> Self {
        Self::with_endpoints(ESTIMATE_BASE_URL, DATA_BASE_URL, RANKING_BASE_URL)
    }

    /// Client against non-default endpoints (tests point this at a mock server)
    pub fn with_endpoints(estimate_base: &str, data_base: &str, ranking_base: &str) -> Self {
        let mut headers = HeaderMap::new();
        // The data endpoints reject requests without a referer
        headers.insert(REFERER, HeaderValue::from_static("https://fund.eastmoney.com/"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (compatible; fundtrack-core)"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            limiter: Arc::new(Semaphore::new(MAX_CONCURRENT_REQUESTS)),
            estimate_base: estimate_base.trim_end_matches('/').to_string(),
            data_base: data_base.trim_end_matches('/').to_string(),
            ranking_base: ranking_base.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the live valuation estimate for one fund code
    pub async fn get_estimate(&self, fund_code: &str) -> Result<FundEstimate, MarketError> {
        let _permit = self.acquire_permit().await?;

        let url = format!("{}/js/{}.js", self.estimate_base, fund_code);
        let response = self
            .client
            .get(&url)
            .query(&[("rt", Local::now().timestamp_millis().to_string())])
            .timeout(ESTIMATE_TIMEOUT)
            .send()
            .await
            .map_err(|e| wrap_send_error(e, fund_code))?;

        if !response.status().is_success() {
            return Err(MarketError::ApiError(format!(
                "Estimate request failed for fund {}: {}",
                fund_code,
                response.status()
            )));
        }

        let body = response.text().await?;
        let payload: EstimatePayload = parse_jsonp(&body, fund_code)?;
        Ok(payload.into_estimate())
    }

    /// Fetch one page of official NAV history, returned oldest-first
    pub async fn get_nav_history(
        &self,
        fund_code: &str,
        page_index: u32,
        page_size: u32,
    ) -> Result<Vec<NetValueRecord>, MarketError> {
        let _permit = self.acquire_permit().await?;

        let url = format!("{}/f10/lsjz", self.data_base);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("fundCode", fund_code),
                ("pageIndex", &page_index.to_string()),
                ("pageSize", &page_size.to_string()),
            ])
            .timeout(HISTORY_TIMEOUT)
            .send()
            .await
            .map_err(|e| wrap_send_error(e, fund_code))?;

        if !response.status().is_success() {
            return Err(MarketError::ApiError(format!(
                "NAV history request failed for fund {}: {}",
                fund_code,
                response.status()
            )));
        }

        let result: NavHistoryResponse = response.json().await?;

        let mut records: Vec<NetValueRecord> = result
            .data
            .list
            .into_iter()
            .filter_map(|row| row.into_record())
            .collect();

        // Upstream pages newest-first; all downstream math wants oldest-first
        records.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(records)
    }

    /// Fetch the open-fund rankings table
    pub async fn get_rankings(
        &self,
        sort: RankingSort,
        count: u32,
    ) -> Result<Vec<RankingEntry>, MarketError> {
        let _permit = self.acquire_permit().await?;

        let url = format!("{}/data/rankhandler.aspx", self.ranking_base);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("op", "ph"),
                ("dt", "kf"),
                ("ft", "all"),
                ("sc", sort.as_param()),
                ("st", "desc"),
                ("pi", "1"),
                ("pn", &count.to_string()),
            ])
            .timeout(HISTORY_TIMEOUT)
            .send()
            .await
            .map_err(|e| wrap_send_error(e, "rankings"))?;

        if !response.status().is_success() {
            return Err(MarketError::ApiError(format!(
                "Rankings request failed: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        parse_rankings(&body)
    }

    /// Fetch recent announcements for a fund
    pub async fn get_announcements(
        &self,
        fund_code: &str,
    ) -> Result<Vec<Announcement>, MarketError> {
        let _permit = self.acquire_permit().await?;

        let url = format!("{}/f10/JJGG", self.data_base);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("fundcode", fund_code),
                ("pageIndex", "1"),
                ("pageSize", "20"),
                ("type", "3"),
            ])
            .timeout(HISTORY_TIMEOUT)
            .send()
            .await
            .map_err(|e| wrap_send_error(e, fund_code))?;

        if !response.status().is_success() {
            return Err(MarketError::ApiError(format!(
                "Announcements request failed for fund {}: {}",
                fund_code,
                response.status()
            )));
        }

        let result: AnnouncementResponse = response.json().await?;
        Ok(result
            .data
            .into_iter()
            .map(|row| row.into_announcement())
            .collect())
    }

    async fn acquire_permit(&self) -> Result<tokio::sync::SemaphorePermit<'_>, MarketError> {
        self.limiter
            .acquire()
            .await
            .map_err(|_| MarketError::ApiError("request limiter closed".to_string()))
    }
}

impl Default for EastmoneyClient {
    fn default() -> Self {
        Self::new()
    }
}

fn wrap_send_error(e: reqwest::Error, fund_code: &str) -> MarketError {
    if e.is_timeout() {
        MarketError::Timeout(fund_code.to_string())
    } else {
        MarketError::HttpError(e)
    }
}

/// Strip the `jsonpgz(...)` envelope and parse the inner JSON.
///
/// An unknown fund code yields an empty envelope `jsonpgz();`.
fn parse_jsonp<T: DeserializeOwned>(body: &str, fund_code: &str) -> Result<T, MarketError> {
    let captures = JSONP_ENVELOPE
        .captures(body)
        .ok_or_else(|| MarketError::ParseError(format!("not a JSONP envelope: {:.60}", body)))?;

    let inner = captures.get(1).map(|m| m.as_str().trim()).unwrap_or("");
    if inner.is_empty() {
        return Err(MarketError::NoData(fund_code.to_string()));
    }

    serde_json::from_str(inner)
        .map_err(|e| MarketError::ParseError(format!("estimate payload: {}", e)))
}

/// Parse the `var rankData = {datas:[...]}` script body
fn parse_rankings(body: &str) -> Result<Vec<RankingEntry>, MarketError> {
    let inner = RANK_DATAS
        .captures(body)
        .and_then(|c| c.get(1))
        .ok_or_else(|| MarketError::ParseError("rankings: no datas array".to_string()))?
        .as_str();

    Ok(RANK_ROW
        .captures_iter(inner)
        .filter_map(|c| parse_ranking_row(c.get(1)?.as_str()))
        .collect())
}

/// One CSV ranking row:
/// code,name,pinyin,date,nav,cumulative,daily%,1w%,1m%,3m%,6m%,1y%,...
fn parse_ranking_row(row: &str) -> Option<RankingEntry> {
    let fields: Vec<&str> = row.split(',').collect();
    if fields.len() < 7 || fields[0].is_empty() {
        return None;
    }

    let period = |idx: usize| -> Option<rust_decimal::Decimal> {
        let raw = fields.get(idx)?.trim();
        if raw.is_empty() {
            return None;
        }
        raw.parse().ok()
    };

    Some(RankingEntry {
        fund_code: fields[0].to_string(),
        name: fields[1].to_string(),
        nav_date: crate::market::market_model::parse_date(fields[3]),
        nav: crate::market::market_model::parse_decimal(fields[4]),
        change_pct: crate::market::market_model::parse_decimal(fields[6]),
        return_1w: period(7),
        return_1m: period(8),
        return_3m: period(9),
        return_6m: period(10),
        return_1y: period(11),
    })
}
