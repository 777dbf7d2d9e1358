pub mod fees;
pub mod holdings_model;
pub mod holdings_repository;
pub mod holdings_service;

pub use fees::{compute_shares, daily_trailing_fee};
pub use holdings_model::{HoldingRecord, HoldingValuation, NewHolding, ShareClass};
pub use holdings_repository::{HoldingsRepository, HoldingsRepositoryTrait};
pub use holdings_service::HoldingsService;
