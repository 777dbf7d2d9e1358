pub mod memory;
pub mod snapshot;
pub mod trading;

pub use memory::TtlCache;
pub use snapshot::{Snapshot, SnapshotStore};
pub use trading::{is_trading_now, is_trading_time};
