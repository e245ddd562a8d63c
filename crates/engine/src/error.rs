//! Engine errors, grouped by who has to act on them:
//!
//! - the caller fixes the input: [`InvalidAmount`], [`InvalidEntry`],
//!   [`ExistingKey`], [`KeyNotFound`]. Nothing was written.
//! - the operator fixes the store: [`StoreUnavailable`], [`Database`],
//!   [`Corrupted`].
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidEntry`]: EngineError::InvalidEntry
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`StoreUnavailable`]: EngineError::StoreUnavailable
//!  [`Database`]: EngineError::Database
//!  [`Corrupted`]: EngineError::Corrupted
use sea_orm::DbErr;
use thiserror::Error;

/// Everything that can go wrong inside the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("amount rejected: {0}")]
    InvalidAmount(String),
    #[error("entry rejected: {0}")]
    InvalidEntry(String),
    #[error("{0} does not exist")]
    KeyNotFound(String),
    #[error("{0} already exists")]
    ExistingKey(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("stored value under '{key}' cannot be decoded: {source}")]
    Corrupted {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

// `DbErr` and `serde_json::Error` are not comparable; compare their text.
impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        use EngineError::*;

        match (self, other) {
            (InvalidAmount(a), InvalidAmount(b))
            | (InvalidEntry(a), InvalidEntry(b))
            | (KeyNotFound(a), KeyNotFound(b))
            | (ExistingKey(a), ExistingKey(b))
            | (StoreUnavailable(a), StoreUnavailable(b)) => a == b,
            (Corrupted { key: a, source: sa }, Corrupted { key: b, source: sb }) => {
                a == b && sa.to_string() == sb.to_string()
            }
            (Database(a), Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
