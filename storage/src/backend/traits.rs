use async_trait::async_trait;

use crate::StorageError;

/// An asynchronous string-to-string store that survives restarts.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
