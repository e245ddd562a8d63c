//! Categories API endpoints.
//!
//! The same handlers serve `/categories` (expenses) and `/income-categories`;
//! the router attaches the `EntryKind` as an extension.

use api_types::category::{CategoryCreated, CategoryNew, CategoryRename, CategoryRenamed};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{EntryKind, RenameOutcome};

use crate::{ServerError, server::ServerState};

fn map_outcome(outcome: RenameOutcome) -> CategoryRenamed {
    match outcome {
        RenameOutcome::Renamed { entries_rewritten } => CategoryRenamed {
            renamed: true,
            entries_rewritten,
        },
        RenameOutcome::Unchanged => CategoryRenamed {
            renamed: false,
            entries_rewritten: 0,
        },
    }
}

pub async fn list(
    Extension(kind): Extension<EntryKind>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<String>>, ServerError> {
    Ok(Json(state.engine.categories(kind).await?))
}

pub async fn create(
    Extension(kind): Extension<EntryKind>,
    State(state): State<ServerState>,
    Json(payload): Json<CategoryNew>,
) -> Result<(StatusCode, Json<CategoryCreated>), ServerError> {
    let name = state.engine.add_category(kind, payload.name()).await?;
    Ok((StatusCode::CREATED, Json(CategoryCreated { name })))
}

pub async fn rename(
    Extension(kind): Extension<EntryKind>,
    State(state): State<ServerState>,
    Path(name): Path<String>,
    Json(payload): Json<CategoryRename>,
) -> Result<Json<CategoryRenamed>, ServerError> {
    let outcome = state
        .engine
        .rename_category(kind, &name, &payload.name)
        .await?;
    Ok(Json(map_outcome(outcome)))
}

pub async fn remove(
    Extension(kind): Extension<EntryKind>,
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_category(kind, &name).await?;
    Ok(StatusCode::NO_CONTENT)
}
