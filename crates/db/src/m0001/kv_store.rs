use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::KvStore;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(KvStore::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(KvStore::Key)
                .string()
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(KvStore::Value).text().not_null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(KvStore::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
