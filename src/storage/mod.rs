pub mod kv_store;
pub mod storage_errors;

pub use kv_store::{FileKvStore, KvStore, KvStoreExt, MemoryKvStore};
pub use storage_errors::StorageError;
