//! Ledger aggregation.
//!
//! Everything here is a pure function over borrowed entry lists: no I/O, no
//! hidden state, inputs are never mutated. Calling any of them twice on the
//! same input yields the same output.

use std::collections::HashMap;

use serde::Serialize;

use crate::{Entry, EntryKind, MoneyCents, Snapshot};

/// An entry placed in the chronological ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerRow {
    #[serde(flatten)]
    pub entry: Entry,
    /// Derived from the amount sign.
    pub kind: EntryKind,
    /// Sum of all amounts from the first row through this one.
    pub balance: MoneyCents,
}

/// Summary totals over both lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income_total: MoneyCents,
    /// Sum of absolute expense amounts, never negative.
    pub expense_total: MoneyCents,
    pub net_balance: MoneyCents,
}

/// Total of one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: MoneyCents,
}

/// Merge expenses and incomes into one list sorted by date, with running
/// balance.
///
/// The sort is stable: rows with the same date keep the order of the
/// concatenation `expenses ++ incomes`.
#[must_use]
pub fn merge_and_balance(expenses: &[Entry], incomes: &[Entry]) -> Vec<LedgerRow> {
    let mut merged: Vec<&Entry> = expenses.iter().chain(incomes).collect();
    merged.sort_by_key(|entry| entry.date);

    let mut balance = MoneyCents::ZERO;
    merged
        .into_iter()
        .map(|entry| {
            balance += entry.amount;
            LedgerRow {
                entry: entry.clone(),
                kind: EntryKind::classify(entry.amount),
                balance,
            }
        })
        .collect()
}

/// Income total, expense total and their difference.
///
/// For sign-normalized inputs `net_balance` equals the balance of the last
/// row returned by [`merge_and_balance`].
#[must_use]
pub fn totals(expenses: &[Entry], incomes: &[Entry]) -> Totals {
    let income_total: MoneyCents = incomes.iter().map(|entry| entry.amount).sum();
    let expense_total: MoneyCents = expenses.iter().map(|entry| entry.amount.abs()).sum();
    Totals {
        income_total,
        expense_total,
        net_balance: income_total - expense_total,
    }
}

/// Per-category sum of absolute amounts, one row per listed category.
///
/// Categories without entries report zero. Entries whose category is not in
/// `categories` are left out of every bucket.
#[must_use]
pub fn category_breakdown(entries: &[Entry], categories: &[String]) -> Vec<CategoryTotal> {
    let mut sums: HashMap<&str, MoneyCents> = HashMap::new();
    for entry in entries {
        *sums.entry(entry.category.as_str()).or_default() += entry.amount.abs();
    }

    categories
        .iter()
        .map(|category| CategoryTotal {
            category: category.clone(),
            total: sums.get(category.as_str()).copied().unwrap_or_default(),
        })
        .collect()
}

/// Everything the presentation layer needs, derived from one snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    pub ledger: Vec<LedgerRow>,
    pub totals: Totals,
    pub expense_breakdown: Vec<CategoryTotal>,
    pub income_breakdown: Vec<CategoryTotal>,
}

impl LedgerView {
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            ledger: merge_and_balance(&snapshot.expenses, &snapshot.incomes),
            totals: totals(&snapshot.expenses, &snapshot.incomes),
            expense_breakdown: category_breakdown(
                &snapshot.expenses,
                &snapshot.expense_categories,
            ),
            income_breakdown: category_breakdown(&snapshot.incomes, &snapshot.income_categories),
        }
    }

    /// Breakdown for one kind.
    #[must_use]
    pub fn breakdown(&self, kind: EntryKind) -> &[CategoryTotal] {
        match kind {
            EntryKind::Expense => &self.expense_breakdown,
            EntryKind::Income => &self.income_breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn entry(id: i64, date: &str, category: &str, cents: i64) -> Entry {
        Entry {
            id,
            date: date.parse::<NaiveDate>().unwrap(),
            category: category.to_string(),
            amount: MoneyCents::new(cents),
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn scenario_income_then_expense() {
        let expenses = vec![entry(1, "2024-01-02", "Food", -1000)];
        let incomes = vec![entry(2, "2024-01-01", "Salary", 10_000)];

        let ledger = merge_and_balance(&expenses, &incomes);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].entry.category, "Salary");
        assert_eq!(ledger[0].kind, EntryKind::Income);
        assert_eq!(ledger[0].balance, MoneyCents::new(10_000));
        assert_eq!(ledger[1].entry.category, "Food");
        assert_eq!(ledger[1].kind, EntryKind::Expense);
        assert_eq!(ledger[1].balance, MoneyCents::new(9_000));

        assert_eq!(
            totals(&expenses, &incomes),
            Totals {
                income_total: MoneyCents::new(10_000),
                expense_total: MoneyCents::new(1_000),
                net_balance: MoneyCents::new(9_000),
            }
        );
    }

    #[test]
    fn empty_inputs_produce_empty_ledger() {
        assert!(merge_and_balance(&[], &[]).is_empty());
        assert_eq!(totals(&[], &[]), Totals::default());
    }

    #[test]
    fn equal_dates_keep_concatenation_order() {
        let expenses = vec![
            entry(1, "2024-03-01", "Rent", -50_000),
            entry(2, "2024-02-01", "Food", -2_000),
        ];
        let incomes = vec![entry(3, "2024-03-01", "Salary", 200_000)];

        let ids: Vec<i64> = merge_and_balance(&expenses, &incomes)
            .iter()
            .map(|row| row.entry.id)
            .collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn ledger_is_sorted_and_complete() {
        let expenses = vec![
            entry(1, "2024-05-10", "Food", -300),
            entry(2, "2023-12-31", "Rent", -90_000),
            entry(3, "2024-01-15", "Fun", -1_250),
        ];
        let incomes = vec![
            entry(4, "2024-02-01", "Salary", 150_000),
            entry(5, "2022-06-01", "Gift", 4_000),
        ];

        let ledger = merge_and_balance(&expenses, &incomes);
        assert_eq!(ledger.len(), expenses.len() + incomes.len());
        assert!(ledger.windows(2).all(|w| w[0].entry.date <= w[1].entry.date));

        let last = ledger.last().unwrap().balance;
        assert_eq!(last, totals(&expenses, &incomes).net_balance);
    }

    #[test]
    fn merge_is_idempotent() {
        let expenses = vec![entry(1, "2024-01-02", "Food", -1000)];
        let incomes = vec![entry(2, "2024-01-01", "Salary", 10_000)];
        assert_eq!(
            merge_and_balance(&expenses, &incomes),
            merge_and_balance(&expenses, &incomes)
        );
    }

    #[test]
    fn expense_total_uses_absolute_values() {
        // A positive expense slipped past normalization still counts as spending.
        let expenses = vec![entry(1, "2024-01-01", "Food", 500), entry(2, "2024-01-02", "Food", -700)];
        assert_eq!(totals(&expenses, &[]).expense_total, MoneyCents::new(1_200));
    }

    #[test]
    fn breakdown_reports_every_category_in_order() {
        let entries = vec![
            entry(1, "2024-01-01", "Food", -1000),
            entry(2, "2024-01-02", "Rent", -50_000),
            entry(3, "2024-01-03", "Food", -250),
        ];
        let breakdown = category_breakdown(&entries, &names(&["Rent", "Fun", "Food"]));

        assert_eq!(
            breakdown,
            vec![
                CategoryTotal {
                    category: "Rent".to_string(),
                    total: MoneyCents::new(50_000)
                },
                CategoryTotal {
                    category: "Fun".to_string(),
                    total: MoneyCents::ZERO
                },
                CategoryTotal {
                    category: "Food".to_string(),
                    total: MoneyCents::new(1_250)
                },
            ]
        );
    }

    #[test]
    fn breakdown_excludes_unlisted_categories() {
        let entries = vec![
            entry(1, "2024-01-01", "Food", -1000),
            entry(2, "2024-01-02", "Stale", -9_999),
        ];
        let breakdown = category_breakdown(&entries, &names(&["Food"]));
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].total, MoneyCents::new(1000));
        assert!(breakdown.iter().all(|row| !row.total.is_negative()));
    }

    #[test]
    fn view_bundles_everything() {
        let snapshot = Snapshot {
            expenses: vec![entry(1, "2024-01-02", "Food", -1000)],
            incomes: vec![entry(2, "2024-01-01", "Salary", 10_000)],
            expense_categories: names(&["Food"]),
            income_categories: names(&["Salary", "Gift"]),
        };
        let view = LedgerView::from_snapshot(&snapshot);
        assert_eq!(view.ledger.len(), 2);
        assert_eq!(view.totals.net_balance, MoneyCents::new(9_000));
        assert_eq!(view.breakdown(EntryKind::Expense)[0].total, MoneyCents::new(1000));
        assert_eq!(view.breakdown(EntryKind::Income).len(), 2);
    }
}
