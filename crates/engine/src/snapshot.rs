use crate::{Entry, EntryKind, LedgerView};

/// The four stored lists as they were read at one point in time.
///
/// A snapshot is a plain value: mutations go through the engine, which writes
/// the store and hands out a fresh snapshot on the next read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub expenses: Vec<Entry>,
    pub incomes: Vec<Entry>,
    pub expense_categories: Vec<String>,
    pub income_categories: Vec<String>,
}

impl Snapshot {
    #[must_use]
    pub fn entries(&self, kind: EntryKind) -> &[Entry] {
        match kind {
            EntryKind::Expense => &self.expenses,
            EntryKind::Income => &self.incomes,
        }
    }

    #[must_use]
    pub fn categories(&self, kind: EntryKind) -> &[String] {
        match kind {
            EntryKind::Expense => &self.expense_categories,
            EntryKind::Income => &self.income_categories,
        }
    }

    /// Derive ledger, totals and breakdowns.
    #[must_use]
    pub fn view(&self) -> LedgerView {
        LedgerView::from_snapshot(self)
    }
}
