//! Key-value store client.
//!
//! The engine persists a handful of named JSON lists. A [`Store`] only needs
//! to read and overwrite whole values by key; everything else (append,
//! filter, rename) happens in memory on top of it.

use std::fmt;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{EngineError, ResultEngine};

pub use memory::MemoryStore;
pub use sql::SqlStore;

mod memory;
mod sql;

/// Legacy key for the expense category list, used before income categories
/// got their own list.
pub const LEGACY_CATEGORIES_KEY: &str = "categories";

#[async_trait]
pub trait Store: Send + Sync + fmt::Debug {
    /// Value previously stored at `key`, or `None` if it was never set.
    async fn get(&self, key: &str) -> ResultEngine<Option<Value>>;

    /// Overwrite the value at `key`.
    async fn set(&self, key: &str, value: Value) -> ResultEngine<()>;

    /// Overwrite several keys.
    ///
    /// The default writes one key after the other: a failure in the middle
    /// leaves the earlier keys written. Stores with multi-key atomicity
    /// override this so that either all values land or none do.
    async fn set_many(&self, values: Vec<(String, Value)>) -> ResultEngine<()> {
        for (key, value) in values {
            self.set(&key, value).await?;
        }
        Ok(())
    }
}

/// Read and decode the list stored at `key`.
pub(crate) async fn load_list<T: DeserializeOwned>(
    store: &dyn Store,
    key: &str,
) -> ResultEngine<Option<Vec<T>>> {
    let Some(value) = store.get(key).await? else {
        tracing::debug!("store key {key} is not set");
        return Ok(None);
    };
    serde_json::from_value(value)
        .map(Some)
        .map_err(|source| EngineError::Corrupted {
            key: key.to_string(),
            source,
        })
}

/// Encode a list for storage.
pub(crate) fn encode_list<T: Serialize>(key: &str, list: &[T]) -> ResultEngine<Value> {
    serde_json::to_value(list).map_err(|source| EngineError::Corrupted {
        key: key.to_string(),
        source,
    })
}
