pub mod alerts;
pub mod analytics;
pub mod cache;
pub mod chart;
pub mod constants;
pub mod errors;
pub mod holdings;
pub mod market;
pub mod storage;
pub mod transactions;
pub mod watchlist;

pub use errors::{Error, Result};
pub use market::{FundEstimate, NetValueRecord};
