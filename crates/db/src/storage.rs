use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;

use crate::table::KvStore;

/// Durable string key-value storage.
#[async_trait::async_trait]
pub trait Storage: Send + Sync + 'static {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct SqliteStorage(pub SqlitePool);

#[async_trait::async_trait]
impl Storage for SqliteStorage {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let statement = Query::select()
            .columns([KvStore::Value])
            .from(KvStore::Table)
            .and_where(Expr::col(KvStore::Key).eq(key))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.0)
            .await?;

        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let statement = Query::insert()
            .into_table(KvStore::Table)
            .columns([KvStore::Key, KvStore::Value])
            .values_panic([key.into(), value.into()])
            .on_conflict(
                OnConflict::column(KvStore::Key)
                    .update_column(KvStore::Value)
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        tracing::debug!(key, bytes = value.len(), "storage key written");

        Ok(())
    }
}
