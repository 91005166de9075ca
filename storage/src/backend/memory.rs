use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::KeyValueStore;
use crate::StorageError;

/// Volatile backend. Clones share the same map, which lets a test keep a
/// handle on what the record store wrote.
#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            items: Arc::new(Mutex::new(items)),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_items() {
        let store = MemoryKeyValueStore::with_items([("players", "[]")]);
        let other = store.clone();

        other.set_item("decks", "[1]").await.unwrap();

        assert_eq!(store.get_item("decks").await.unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.get_item("players").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get_item("results").await.unwrap(), None);
    }
}
