use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::ResultEngine;

use super::Store;

/// Store kept entirely in process memory.
///
/// Used for tests and throwaway runs. `set_many` holds the write lock for
/// the whole batch, so it is atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with `values`.
    #[must_use]
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: RwLock::new(values.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> ResultEngine<Option<Value>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> ResultEngine<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn set_many(&self, values: Vec<(String, Value)>) -> ResultEngine<()> {
        let mut guard = self.values.write().await;
        guard.extend(values);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn get_of_unset_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("expenses").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_overwrites_whole_value() {
        let store = MemoryStore::with_values([("categories", json!(["Food"]))]);
        store.set("categories", json!(["Rent"])).await.unwrap();
        assert_eq!(store.get("categories").await.unwrap(), Some(json!(["Rent"])));
    }

    #[tokio::test]
    async fn set_many_writes_every_key() {
        let store = MemoryStore::new();
        store
            .set_many(vec![
                ("a".to_string(), json!([1])),
                ("b".to_string(), json!([2])),
            ])
            .await
            .unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(json!([1])));
        assert_eq!(store.get("b").await.unwrap(), Some(json!([2])));
    }
}
