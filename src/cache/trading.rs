//! Trading-hours policy
//!
//! A pure function of weekday and time-of-day: weekdays 09:30–15:00 local.
//! Public holidays are not modeled; on a holiday the app polls and serves
//! whatever the upstream returns. This is intentional product behavior, do
//! not add a holiday calendar here without product input.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

use crate::constants::{MARKET_CLOSE, MARKET_OPEN};

/// Whether `at` falls inside the trading session
pub fn is_trading_time(at: NaiveDateTime) -> bool {
    let weekday = at.weekday().number_from_monday();
    if weekday > 5 {
        return false;
    }

    let minutes = at.hour() * 60 + at.minute();
    let open = MARKET_OPEN.0 * 60 + MARKET_OPEN.1;
    let close = MARKET_CLOSE.0 * 60 + MARKET_CLOSE.1;
    minutes >= open && minutes < close
}

/// Whether the market is open right now (local wall clock)
pub fn is_trading_now() -> bool {
    is_trading_time(Local::now().naive_local())
}
