//! Category list operations.
//!
//! Pure functions over in-memory lists: each returns new lists and never
//! touches the store. The engine loads, calls these, and persists the result.

use crate::{Entry, EngineError, ResultEngine, util::normalize_category_display};

/// Result of a rename request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The category was renamed and `entries_rewritten` entries now carry the
    /// new name.
    Renamed { entries_rewritten: usize },
    /// The new name equals the old one or is already taken; nothing changed.
    Unchanged,
}

/// New lists produced by a rename.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RenamePlan {
    pub(crate) categories: Vec<String>,
    pub(crate) entries: Vec<Entry>,
    pub(crate) entries_rewritten: usize,
}

/// Append `name` to `categories`.
///
/// Returns the normalized name together with the new list.
pub(crate) fn add_category(categories: &[String], name: &str) -> ResultEngine<(String, Vec<String>)> {
    let name = normalize_category_display(name)?;
    if categories.contains(&name) {
        return Err(EngineError::ExistingKey(name));
    }
    let mut updated = categories.to_vec();
    updated.push(name.clone());
    Ok((name, updated))
}

/// Rename `old` to `new` in the category list and in every entry using it.
///
/// `None` means the rename is a no-op.
pub(crate) fn rename_category(
    categories: &[String],
    entries: &[Entry],
    old: &str,
    new: &str,
) -> ResultEngine<Option<RenamePlan>> {
    let old = normalize_category_display(old)?;
    let new = normalize_category_display(new)?;

    if old == new || categories.contains(&new) {
        return Ok(None);
    }
    if !categories.contains(&old) {
        return Err(EngineError::KeyNotFound(old));
    }

    let categories = categories
        .iter()
        .map(|category| {
            if *category == old {
                new.clone()
            } else {
                category.clone()
            }
        })
        .collect();

    let mut entries_rewritten = 0;
    let entries = entries
        .iter()
        .map(|entry| {
            if entry.category == old {
                entries_rewritten += 1;
                Entry {
                    category: new.clone(),
                    ..entry.clone()
                }
            } else {
                entry.clone()
            }
        })
        .collect();

    Ok(Some(RenamePlan {
        categories,
        entries,
        entries_rewritten,
    }))
}

/// Remove `name` from `categories`. Entries are left alone.
pub(crate) fn delete_category(categories: &[String], name: &str) -> ResultEngine<Vec<String>> {
    let name = normalize_category_display(name)?;
    if !categories.contains(&name) {
        return Err(EngineError::KeyNotFound(name));
    }
    Ok(categories
        .iter()
        .filter(|category| **category != name)
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::MoneyCents;

    fn list(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn expense(id: i64, category: &str) -> Entry {
        Entry {
            id,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category: category.to_string(),
            amount: MoneyCents::new(-500),
        }
    }

    #[test]
    fn add_rejects_duplicates() {
        let (name, categories) = add_category(&[], "Food").unwrap();
        assert_eq!(name, "Food");
        assert_eq!(categories, list(&["Food"]));

        let err = add_category(&categories, " Food ").unwrap_err();
        assert_eq!(err, EngineError::ExistingKey("Food".to_string()));
    }

    #[test]
    fn rename_rewrites_matching_entries() {
        let categories = list(&["Food", "Rent"]);
        let entries = vec![expense(1, "Food"), expense(2, "Rent"), expense(3, "Food")];

        let plan = rename_category(&categories, &entries, "Food", "Groceries")
            .unwrap()
            .unwrap();

        assert_eq!(plan.categories, list(&["Groceries", "Rent"]));
        assert_eq!(plan.entries_rewritten, 2);
        assert_eq!(plan.entries[0].category, "Groceries");
        assert_eq!(plan.entries[1].category, "Rent");
        assert_eq!(plan.entries[2].category, "Groceries");
        // Inputs are untouched.
        assert_eq!(entries[0].category, "Food");
    }

    #[test]
    fn rename_to_existing_or_same_name_is_noop() {
        let categories = list(&["Food", "Rent"]);
        let entries = vec![expense(1, "Food")];

        assert_eq!(
            rename_category(&categories, &entries, "Food", "Rent").unwrap(),
            None
        );
        assert_eq!(
            rename_category(&categories, &entries, "Food", "Food").unwrap(),
            None
        );
    }

    #[test]
    fn rename_of_missing_category_fails() {
        let err = rename_category(&list(&["Rent"]), &[], "Food", "Groceries").unwrap_err();
        assert_eq!(err, EngineError::KeyNotFound("Food".to_string()));
    }

    #[test]
    fn delete_keeps_other_categories_in_order() {
        let categories = list(&["Food", "Rent", "Fun"]);
        assert_eq!(
            delete_category(&categories, "Rent").unwrap(),
            list(&["Food", "Fun"])
        );
        assert!(matches!(
            delete_category(&categories, "Travel"),
            Err(EngineError::KeyNotFound(_))
        ));
    }
}
