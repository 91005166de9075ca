pub mod backend;
pub mod config;
pub mod error;
pub mod retry;
pub mod store;

pub use backend::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use config::{JournalConfig, StoreConfig};
pub use error::StorageError;
pub use retry::retry_with_backoff;
pub use store::{CollectionKey, PersistHandle, RecordStore};
