pub mod period_returns;

pub use period_returns::{period_returns, LookbackWindow, PeriodReturn};
