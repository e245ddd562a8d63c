use crate::{
    EntryKind, RenameOutcome, ResultEngine, categories,
    store::encode_list,
};

use super::Engine;

impl Engine {
    /// Category names of `kind`, in stored order.
    pub async fn categories(&self, kind: EntryKind) -> ResultEngine<Vec<String>> {
        self.load_categories(kind).await
    }

    /// Add a category; fails with `ExistingKey` if the name is taken.
    ///
    /// Returns the name as stored (trimmed and normalized).
    pub async fn add_category(&self, kind: EntryKind, name: &str) -> ResultEngine<String> {
        let _guard = self.lock.lock().await;
        let current = self.load_categories(kind).await?;
        let (name, updated) = categories::add_category(&current, name)?;
        self.save_categories(kind, &updated).await?;

        tracing::info!("added {kind} category '{name}'");
        Ok(name)
    }

    /// Rename a category and every entry of the same kind that uses it.
    ///
    /// Both lists are written with a single `set_many`, atomic on stores that
    /// support it.
    pub async fn rename_category(
        &self,
        kind: EntryKind,
        old: &str,
        new: &str,
    ) -> ResultEngine<RenameOutcome> {
        let _guard = self.lock.lock().await;
        let current = self.load_categories(kind).await?;
        let entries = self.load_entries(kind).await?;

        let Some(plan) = categories::rename_category(&current, &entries, old, new)? else {
            tracing::warn!("rename of {kind} category '{old}' to '{new}' is a no-op");
            return Ok(RenameOutcome::Unchanged);
        };

        let categories_key = kind.categories_key();
        let entries_key = kind.entries_key();
        self.store
            .set_many(vec![
                (
                    categories_key.to_string(),
                    encode_list(categories_key, &plan.categories)?,
                ),
                (
                    entries_key.to_string(),
                    encode_list(entries_key, &plan.entries)?,
                ),
            ])
            .await?;

        tracing::info!(
            "renamed {kind} category '{old}' to '{new}', {} entries rewritten",
            plan.entries_rewritten
        );
        Ok(RenameOutcome::Renamed {
            entries_rewritten: plan.entries_rewritten,
        })
    }

    /// Remove a category. Entries referencing it keep the old label.
    pub async fn delete_category(&self, kind: EntryKind, name: &str) -> ResultEngine<()> {
        let _guard = self.lock.lock().await;
        let current = self.load_categories(kind).await?;
        let updated = categories::delete_category(&current, name)?;
        self.save_categories(kind, &updated).await?;

        tracing::info!("deleted {kind} category '{}'", name.trim());
        Ok(())
    }
}
