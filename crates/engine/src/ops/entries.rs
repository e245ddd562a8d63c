use chrono::Utc;

use crate::{Entry, EntryDraft, EntryKind, EngineError, ResultEngine};

use super::Engine;

impl Engine {
    /// All entries of `kind`, in stored order.
    pub async fn entries(&self, kind: EntryKind) -> ResultEngine<Vec<Entry>> {
        self.load_entries(kind).await
    }

    /// Validate `draft` and append it to the list of `kind`.
    ///
    /// Nothing is written when validation fails.
    pub async fn create_entry(&self, kind: EntryKind, draft: &EntryDraft) -> ResultEngine<Entry> {
        let new_entry = draft.validate(kind)?;

        let _guard = self.lock.lock().await;
        let mut entries = self.load_entries(kind).await?;
        let entry = new_entry.into_entry(&entries, Utc::now().timestamp_millis());
        entries.push(entry.clone());
        self.save_entries(kind, &entries).await?;

        tracing::info!("created {kind} {} ({})", entry.id, entry.category);
        Ok(entry)
    }

    /// Remove the entry with `id` from the list of `kind`.
    pub async fn delete_entry(&self, kind: EntryKind, id: i64) -> ResultEngine<()> {
        let _guard = self.lock.lock().await;
        let entries = self.load_entries(kind).await?;
        if !entries.iter().any(|entry| entry.id == id) {
            return Err(EngineError::KeyNotFound(format!("{kind} {id}")));
        }

        let remaining: Vec<Entry> = entries.into_iter().filter(|entry| entry.id != id).collect();
        self.save_entries(kind, &remaining).await?;

        tracing::info!("deleted {kind} {id}");
        Ok(())
    }
}
