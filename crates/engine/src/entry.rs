//! The module contains the `Entry` type and the creation path that validates
//! raw user input into one.
//!
//! Both expenses and incomes are represented by `Entry`; the sign of the
//! amount tells them apart (negative = expense, positive = income).
use core::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents, ResultEngine, util::normalize_category_display};

/// A dated, categorized, signed monetary record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub amount: MoneyCents,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.category, self.amount)
    }
}

/// Which list an entry (or category) belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    pub const ALL: [EntryKind; 2] = [EntryKind::Expense, EntryKind::Income];

    /// Store key holding the entries of this kind.
    #[must_use]
    pub const fn entries_key(self) -> &'static str {
        match self {
            Self::Expense => "expenses",
            Self::Income => "incomes",
        }
    }

    /// Store key holding the category names of this kind.
    #[must_use]
    pub const fn categories_key(self) -> &'static str {
        match self {
            Self::Expense => "expenseCategories",
            Self::Income => "incomeCategories",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    /// Classify a stored amount by its sign.
    #[must_use]
    pub const fn classify(amount: MoneyCents) -> Self {
        if amount.is_negative() {
            Self::Expense
        } else {
            Self::Income
        }
    }

    /// Force the sign convention of this kind onto `amount`.
    #[must_use]
    pub const fn normalize(self, amount: MoneyCents) -> MoneyCents {
        match self {
            Self::Expense => MoneyCents::new(-amount.abs().cents()),
            Self::Income => amount.abs(),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" | "expenses" => Ok(Self::Expense),
            "income" | "incomes" => Ok(Self::Income),
            other => Err(EngineError::InvalidEntry(format!(
                "unknown entry kind: {other}"
            ))),
        }
    }
}

/// Raw user input for a new entry, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub date: String,
    pub category: String,
    pub amount: String,
}

/// A draft that passed validation and only lacks an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub category: String,
    pub amount: MoneyCents,
}

impl EntryDraft {
    /// Validate every field and apply the sign convention of `kind`.
    ///
    /// Rejects a missing/invalid date, a blank category and a missing,
    /// malformed or zero amount.
    pub fn validate(&self, kind: EntryKind) -> ResultEngine<NewEntry> {
        let date = self.date.trim();
        if date.is_empty() {
            return Err(EngineError::InvalidEntry("date is required".to_string()));
        }
        let date = date
            .parse::<NaiveDate>()
            .map_err(|err| EngineError::InvalidEntry(format!("invalid date '{date}': {err}")))?;

        let category = normalize_category_display(&self.category)?;

        let amount: MoneyCents = self.amount.parse()?;
        if amount.is_zero() {
            return Err(EngineError::InvalidAmount(
                "amount must not be zero".to_string(),
            ));
        }

        Ok(NewEntry {
            date,
            category,
            amount: kind.normalize(amount),
        })
    }
}

impl NewEntry {
    /// Attach an id that does not collide with `existing`.
    ///
    /// `now_millis` is the preferred id; on collision the id becomes one past
    /// the largest id in the list.
    #[must_use]
    pub fn into_entry(self, existing: &[Entry], now_millis: i64) -> Entry {
        Entry {
            id: next_id(existing, now_millis),
            date: self.date,
            category: self.category,
            amount: self.amount,
        }
    }
}

pub(crate) fn next_id(existing: &[Entry], candidate: i64) -> i64 {
    if existing.iter().all(|entry| entry.id != candidate) {
        return candidate;
    }
    existing
        .iter()
        .map(|entry| entry.id)
        .max()
        .map_or(candidate, |max| max.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(date: &str, category: &str, amount: &str) -> EntryDraft {
        EntryDraft {
            date: date.to_string(),
            category: category.to_string(),
            amount: amount.to_string(),
        }
    }

    fn entry(id: i64) -> Entry {
        Entry {
            id,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category: "Food".to_string(),
            amount: MoneyCents::new(-100),
        }
    }

    #[test]
    fn expense_amount_is_forced_negative() {
        let new = draft("2024-01-02", "Food", "10").validate(EntryKind::Expense).unwrap();
        assert_eq!(new.amount, MoneyCents::new(-1000));
        let new = draft("2024-01-02", "Food", "-10").validate(EntryKind::Expense).unwrap();
        assert_eq!(new.amount, MoneyCents::new(-1000));
    }

    #[test]
    fn income_amount_is_forced_positive() {
        let new = draft("2024-01-01", "Salary", "-100").validate(EntryKind::Income).unwrap();
        assert_eq!(new.amount, MoneyCents::new(10_000));
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = draft("2024-01-01", "Food", "0").validate(EntryKind::Expense).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
        let err = draft("2024-01-01", "Food", "0.00").validate(EntryKind::Income).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert!(matches!(
            draft("", "Food", "1").validate(EntryKind::Expense),
            Err(EngineError::InvalidEntry(_))
        ));
        assert!(matches!(
            draft("2024-01-01", "  ", "1").validate(EntryKind::Expense),
            Err(EngineError::InvalidEntry(_))
        ));
        assert!(matches!(
            draft("2024-01-01", "Food", "").validate(EntryKind::Expense),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(matches!(
            draft("2024-01-01", "Food", "ten").validate(EntryKind::Expense),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn invalid_date_is_rejected() {
        assert!(matches!(
            draft("2024-02-30", "Food", "1").validate(EntryKind::Expense),
            Err(EngineError::InvalidEntry(_))
        ));
        assert!(matches!(
            draft("yesterday", "Food", "1").validate(EntryKind::Expense),
            Err(EngineError::InvalidEntry(_))
        ));
    }

    #[test]
    fn category_is_normalized() {
        let new = draft("2024-01-01", " Eating   out ", "5")
            .validate(EntryKind::Expense)
            .unwrap();
        assert_eq!(new.category, "Eating out");
    }

    #[test]
    fn id_avoids_collisions() {
        let existing = vec![entry(5), entry(9)];
        assert_eq!(next_id(&existing, 7), 7);
        assert_eq!(next_id(&existing, 5), 10);
        assert_eq!(next_id(&[], 42), 42);
    }

    #[test]
    fn kind_parses_singular_and_plural() {
        assert_eq!("expenses".parse::<EntryKind>().unwrap(), EntryKind::Expense);
        assert_eq!("Income".parse::<EntryKind>().unwrap(), EntryKind::Income);
        assert!("transfer".parse::<EntryKind>().is_err());
    }

    #[test]
    fn entry_json_matches_stored_shape() {
        let json = serde_json::to_value(entry(1)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "date": "2024-01-01", "category": "Food", "amount": -1.0})
        );
    }
}
