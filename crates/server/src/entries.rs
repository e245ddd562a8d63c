//! Expenses and incomes API endpoints.

use api_types::entry::{EntryNew, EntryView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{EntryDraft, EntryKind};

use crate::{ServerError, server::ServerState};

pub(crate) fn map_entry(entry: engine::Entry) -> EntryView {
    EntryView {
        id: entry.id,
        date: entry.date,
        category: entry.category,
        amount: entry.amount.to_major(),
    }
}

fn draft_from(payload: EntryNew) -> EntryDraft {
    EntryDraft {
        date: payload.date.unwrap_or_default(),
        category: payload.category.unwrap_or_default(),
        amount: payload
            .amount
            .map(|amount| amount.as_text())
            .unwrap_or_default(),
    }
}

pub async fn list(
    Extension(kind): Extension<EntryKind>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<EntryView>>, ServerError> {
    let entries = state
        .engine
        .entries(kind)
        .await?
        .into_iter()
        .map(map_entry)
        .collect();

    Ok(Json(entries))
}

pub async fn create(
    Extension(kind): Extension<EntryKind>,
    State(state): State<ServerState>,
    Json(payload): Json<EntryNew>,
) -> Result<(StatusCode, Json<EntryView>), ServerError> {
    let entry = state.engine.create_entry(kind, &draft_from(payload)).await?;
    Ok((StatusCode::CREATED, Json(map_entry(entry))))
}

pub async fn remove(
    Extension(kind): Extension<EntryKind>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_entry(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
