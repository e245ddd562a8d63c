use async_trait::async_trait;
use sea_orm::{
    ActiveValue, ConnectionTrait, DatabaseConnection, EntityTrait, TransactionTrait,
    sea_query::OnConflict,
};
use serde_json::Value;

use crate::{EngineError, ResultEngine, kv};

use super::Store;

/// Store backed by the `kv` table of a SQL database (SQLite in practice).
///
/// `set_many` runs inside one database transaction, so a multi-key write
/// such as a category rename either lands completely or not at all.
#[derive(Clone, Debug)]
pub struct SqlStore {
    database: DatabaseConnection,
}

impl SqlStore {
    /// Wrap an already migrated connection.
    #[must_use]
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

async fn upsert<C: ConnectionTrait>(conn: &C, key: &str, value: &Value) -> ResultEngine<()> {
    let model = kv::ActiveModel {
        key: ActiveValue::Set(key.to_string()),
        value: ActiveValue::Set(value.to_string()),
    };
    kv::Entity::insert(model)
        .on_conflict(
            OnConflict::column(kv::Column::Key)
                .update_column(kv::Column::Value)
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl Store for SqlStore {
    async fn get(&self, key: &str) -> ResultEngine<Option<Value>> {
        let Some(model) = kv::Entity::find_by_id(key.to_string())
            .one(&self.database)
            .await?
        else {
            return Ok(None);
        };

        serde_json::from_str(&model.value)
            .map(Some)
            .map_err(|source| EngineError::Corrupted {
                key: key.to_string(),
                source,
            })
    }

    async fn set(&self, key: &str, value: Value) -> ResultEngine<()> {
        tracing::debug!("writing store key {key}");
        upsert(&self.database, key, &value).await
    }

    async fn set_many(&self, values: Vec<(String, Value)>) -> ResultEngine<()> {
        let db_tx = self.database.begin().await?;
        for (key, value) in &values {
            tracing::debug!("writing store key {key} (batched)");
            upsert(&db_tx, key, value).await?;
        }
        db_tx.commit().await?;
        Ok(())
    }
}
