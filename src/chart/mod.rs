pub mod chart_model;
pub mod series;

pub use chart_model::{ChartPoint, ChartSeries};
pub use series::build_nav_series;
