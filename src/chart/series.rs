//! Display-series preparation

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::chart::chart_model::{ChartPoint, ChartSeries};
use crate::constants::CHART_RANGE_PADDING;
use crate::market::{FundEstimate, NetValueRecord};

/// Merge official NAV history with the live estimate into a drawable series.
///
/// `live` is passed only for the live/current-day range selection. If the
/// history already carries a point for `today` it is overwritten with the
/// estimate, otherwise a synthetic point for today is appended. An empty
/// history degrades to a single point (estimate, else last close, else
/// zero) so the renderer never sees an empty array.
pub fn build_nav_series(
    history: &[NetValueRecord],
    live: Option<&FundEstimate>,
    today: NaiveDate,
) -> ChartSeries {
    let mut points: Vec<ChartPoint> = history
        .iter()
        .map(|r| ChartPoint {
            date: r.date,
            value: r.nav,
        })
        .collect();

    let mut live_index = None;
    if let Some(estimate) = live {
        let value = estimate.current_price();
        match points.iter().position(|p| p.date == today) {
            Some(idx) => {
                points[idx].value = value;
                live_index = Some(idx);
            }
            None => {
                points.push(ChartPoint { date: today, value });
                live_index = Some(points.len() - 1);
            }
        }
    }

    if points.is_empty() {
        points.push(ChartPoint {
            date: today,
            value: Decimal::ZERO,
        });
    }

    let mut min = points[0].value;
    let mut max = points[0].value;
    for point in &points[1..] {
        if point.value < min {
            min = point.value;
        }
        if point.value > max {
            max = point.value;
        }
    }

    let padding = (max - min) * CHART_RANGE_PADDING;

    ChartSeries {
        points,
        y_min: min - padding,
        y_max: max + padding,
        live_index,
    }
}
