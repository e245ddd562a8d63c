//! Core of Tally: entries, categories, the ledger aggregation and the store
//! they live in.
//!
//! The aggregation functions in [`ledger`] are pure and can be used on any
//! pair of entry lists. [`Engine`] wraps a [`Store`] and implements the
//! load/modify/persist cycle for every mutation.

pub use categories::RenameOutcome;
pub use currency::Currency;
pub use entry::{Entry, EntryDraft, EntryKind, NewEntry};
pub use error::EngineError;
pub use ledger::{
    CategoryTotal, LedgerRow, LedgerView, Totals, category_breakdown, merge_and_balance, totals,
};
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use snapshot::Snapshot;
pub use store::{MemoryStore, SqlStore, Store};
pub use sea_orm::{DatabaseConnection, DbErr};

mod categories;
mod currency;
mod entry;
mod error;
pub mod kv;
pub mod ledger;
mod money;
mod ops;
mod snapshot;
pub mod store;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
