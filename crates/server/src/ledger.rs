//! Derived views: the running-balance ledger and per-category breakdowns.

use api_types::ledger::{CategoryTotalView, LedgerRowView};
use axum::{
    Json,
    extract::{Path, State},
};
use engine::{CategoryTotal, EntryKind, LedgerRow};

use crate::{ServerError, server::ServerState};

fn map_kind(kind: EntryKind) -> api_types::EntryKind {
    match kind {
        EntryKind::Expense => api_types::EntryKind::Expense,
        EntryKind::Income => api_types::EntryKind::Income,
    }
}

fn map_row(row: LedgerRow) -> LedgerRowView {
    LedgerRowView {
        id: row.entry.id,
        date: row.entry.date,
        category: row.entry.category,
        amount: row.entry.amount.to_major(),
        kind: map_kind(row.kind),
        balance: row.balance.to_major(),
    }
}

fn map_total(total: &CategoryTotal) -> CategoryTotalView {
    CategoryTotalView {
        category: total.category.clone(),
        total: total.total.to_major(),
    }
}

pub async fn get_ledger(
    State(state): State<ServerState>,
) -> Result<Json<Vec<LedgerRowView>>, ServerError> {
    let view = state.engine.view().await?;
    Ok(Json(view.ledger.into_iter().map(map_row).collect()))
}

pub async fn get_breakdown(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<CategoryTotalView>>, ServerError> {
    let kind: EntryKind = kind
        .parse()
        .map_err(|_| ServerError::Generic(format!("unknown kind '{kind}'")))?;

    let view = state.engine.view().await?;
    Ok(Json(view.breakdown(kind).iter().map(map_total).collect()))
}
