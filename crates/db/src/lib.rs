use sqlx_migrator::{Info, Migrate, Migrator, Plan};

mod m0001;
mod storage;
pub mod table;

pub use storage::*;

pub fn migrator<DB: sqlx::Database>() -> Result<Migrator<DB>, sqlx_migrator::Error>
where
    m0001::Migration: sqlx_migrator::Migration<DB>,
{
    let mut migrator = Migrator::<DB>::default();
    migrator.add_migrations(vec![Box::new(m0001::Migration)])?;

    Ok(migrator)
}

/// Applies every pending migration on `pool`.
pub async fn migrate(pool: &sqlx::SqlitePool) -> anyhow::Result<()> {
    let mut conn = pool.acquire().await?;
    migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(())
}
