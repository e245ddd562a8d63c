use axum::{
    Extension, Router,
    routing::{delete, get, patch},
};

use std::sync::Arc;

use crate::{categories, entries, ledger, statistics};
use engine::{Currency, Engine, EntryKind};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Label reported by `/stats`, never used for conversion.
    pub currency: Currency,
}

/// Entry and category routes of one kind.
fn resource_routes(kind: EntryKind, entries_path: &str, categories_path: &str) -> Router<ServerState> {
    Router::new()
        .route(entries_path, get(entries::list).post(entries::create))
        .route(&format!("{entries_path}/{{id}}"), delete(entries::remove))
        .route(
            categories_path,
            get(categories::list).post(categories::create),
        )
        .route(
            &format!("{categories_path}/{{name}}"),
            patch(categories::rename).delete(categories::remove),
        )
        .layer(Extension(kind))
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(resource_routes(EntryKind::Expense, "/expenses", "/categories"))
        .merge(resource_routes(
            EntryKind::Income,
            "/incomes",
            "/income-categories",
        ))
        .route("/ledger", get(ledger::get_ledger))
        .route("/breakdown/{kind}", get(ledger::get_breakdown))
        .route("/stats", get(statistics::get_stats))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    currency: Currency,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        currency,
    };

    axum::serve(listener, router(state)).await
}
