use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;

use crate::{
    Entry, EntryKind, LedgerView, MemoryStore, ResultEngine, Snapshot, SqlStore, Store,
    store::{LEGACY_CATEGORIES_KEY, encode_list, load_list},
};

mod categories;
mod entries;

/// The service the outer layers talk to.
///
/// Reads go straight to the store; every read-modify-write cycle runs under
/// `lock`, so two mutations issued through the same engine never overwrite
/// each other. Writers in other processes are not covered.
#[derive(Debug)]
pub struct Engine {
    store: Arc<dyn Store>,
    lock: Mutex<()>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Load all four lists.
    ///
    /// Taken under the engine lock, so a snapshot never observes half of a
    /// rename issued through this engine.
    pub async fn snapshot(&self) -> ResultEngine<Snapshot> {
        let _guard = self.lock.lock().await;
        Ok(Snapshot {
            expenses: self.load_entries(EntryKind::Expense).await?,
            incomes: self.load_entries(EntryKind::Income).await?,
            expense_categories: self.load_categories(EntryKind::Expense).await?,
            income_categories: self.load_categories(EntryKind::Income).await?,
        })
    }

    /// Snapshot the store and derive the ledger view from it.
    pub async fn view(&self) -> ResultEngine<LedgerView> {
        Ok(self.snapshot().await?.view())
    }

    async fn load_entries(&self, kind: EntryKind) -> ResultEngine<Vec<Entry>> {
        Ok(load_list(self.store.as_ref(), kind.entries_key())
            .await?
            .unwrap_or_default())
    }

    async fn load_categories(&self, kind: EntryKind) -> ResultEngine<Vec<String>> {
        if let Some(categories) = load_list(self.store.as_ref(), kind.categories_key()).await? {
            return Ok(categories);
        }
        if kind == EntryKind::Expense
            && let Some(categories) =
                load_list(self.store.as_ref(), LEGACY_CATEGORIES_KEY).await?
        {
            tracing::warn!(
                "reading expense categories from legacy key '{LEGACY_CATEGORIES_KEY}'"
            );
            return Ok(categories);
        }
        Ok(Vec::new())
    }

    async fn save_entries(&self, kind: EntryKind, entries: &[Entry]) -> ResultEngine<()> {
        let key = kind.entries_key();
        self.store.set(key, encode_list(key, entries)?).await
    }

    async fn save_categories(&self, kind: EntryKind, categories: &[String]) -> ResultEngine<()> {
        let key = kind.categories_key();
        self.store.set(key, encode_list(key, categories)?).await
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Arc<dyn Store>>,
}

impl EngineBuilder {
    /// Use `store` for persistence.
    pub fn store(mut self, store: Arc<dyn Store>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    /// Persist into the `kv` table of an already migrated database.
    pub fn database(self, db: DatabaseConnection) -> EngineBuilder {
        self.store(Arc::new(SqlStore::new(db)))
    }

    /// Construct `Engine`. Without a store it keeps everything in memory.
    pub async fn build(self) -> ResultEngine<Engine> {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));
        Ok(Engine {
            store,
            lock: Mutex::new(()),
        })
    }
}
