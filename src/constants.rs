use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;

/// Storage key for the watchlist blob
pub const WATCHLIST_KEY: &str = "watchlist";

/// Storage key for the holdings blob
pub const HOLDINGS_KEY: &str = "holdings";

/// Storage key for the transaction log blob
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Storage key for alert rules
pub const ALERT_RULES_KEY: &str = "alert_rules";

/// Storage key for already-shown announcement ids
pub const SHOWN_ANNOUNCEMENTS_KEY: &str = "shown_announcements";

/// TTL for live valuation estimates (one polling tick)
pub const ESTIMATE_TTL: Duration = Duration::from_secs(60);

/// TTL for official NAV history (published once daily)
pub const HISTORY_TTL: Duration = Duration::from_secs(3600);

/// TTL for market rankings
pub const RANKING_TTL: Duration = Duration::from_secs(3600);

/// Request timeout for the valuation estimate endpoint
pub const ESTIMATE_TIMEOUT: Duration = Duration::from_secs(8);

/// Request timeout for history/rankings/announcement endpoints
pub const HISTORY_TIMEOUT: Duration = Duration::from_secs(15);

/// Maximum simultaneous outbound requests
pub const MAX_CONCURRENT_REQUESTS: usize = 5;

/// Market open, (hour, minute) local time
pub const MARKET_OPEN: (u32, u32) = (9, 30);

/// Market close, (hour, minute) local time
pub const MARKET_CLOSE: (u32, u32) = (15, 0);

/// Decimal precision for display values
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Minimum nonzero daily trailing fee charged for C-class shares
pub const MIN_TRAILING_FEE: Decimal = dec!(0.01);

/// Fee accrual day count basis
pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Y-axis padding applied on each side of a chart series range
pub const CHART_RANGE_PADDING: Decimal = dec!(0.1);
