use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener};

mod categories;
mod entries;
mod ledger;
mod server;
mod statistics;

/// Failure of a request handler, rendered as `{"error": "..."}`.
pub enum ServerError {
    Engine(EngineError),
    /// The request itself is malformed (400).
    Generic(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Status code and client-facing message for an engine error.
///
/// Store failures are logged here and reach the client only as a generic
/// message.
fn classify(err: EngineError) -> (StatusCode, String) {
    match err {
        EngineError::InvalidAmount(_) | EngineError::InvalidEntry(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        EngineError::ExistingKey(_) => (StatusCode::CONFLICT, err.to_string()),
        EngineError::KeyNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        EngineError::StoreUnavailable(_) | EngineError::Database(_) => {
            tracing::error!("{err}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "store unavailable".to_string(),
            )
        }
        EngineError::Corrupted { .. } => {
            tracing::error!("{err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => classify(err),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
