pub mod memory;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;
pub use traits::KeyValueStore;
