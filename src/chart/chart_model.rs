//! Chart series data
//!
//! The core builds these; the frontend just renders them onto its canvas.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single point of the display series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// A ready-to-draw line/area series with a padded value range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// Never empty; an empty history degrades to a single point
    pub points: Vec<ChartPoint>,

    /// Padded lower bound of the value axis
    pub y_min: Decimal,

    /// Padded upper bound of the value axis
    pub y_max: Decimal,

    /// Index of the live (estimated) trailing point, when one was merged in.
    /// The renderer animates this point.
    pub live_index: Option<usize>,
}

impl ChartSeries {
    /// Evenly spaced tick values over the padded range, bottom to top,
    /// formatted at NAV precision
    pub fn y_axis_labels(&self, ticks: usize) -> Vec<String> {
        if ticks < 2 {
            return vec![format!("{:.4}", self.y_min)];
        }

        let span = self.y_max - self.y_min;
        let step = span / Decimal::from(ticks as u64 - 1);
        (0..ticks)
            .map(|i| format!("{:.4}", self.y_min + step * Decimal::from(i as u64)))
            .collect()
    }
}
