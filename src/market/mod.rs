pub mod eastmoney_client;
pub mod market_errors;
pub mod market_model;
pub mod market_service;

pub use eastmoney_client::{EastmoneyClient, RankingSort};
pub use market_errors::MarketError;
pub use market_model::{Announcement, FundEstimate, NetValueRecord, RankingEntry};
pub use market_service::{AnnouncementTracker, MarketService, MarketServiceTrait};
