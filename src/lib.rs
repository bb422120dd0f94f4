pub mod config;
pub mod db;
pub mod document;
pub mod observability;
pub mod persistence;
pub mod planner;
pub mod transfer;

pub use persistence::Persistence;
pub use planner::Planner;
pub use transfer::{Prompt, Transfer};

/// Open the configured database and apply pending migrations
pub async fn open_storage(config: &config::Config) -> anyhow::Result<mealcal_db::SqliteStorage> {
    let pool = db::create_pool(&config.database.url, config.database.max_connections).await?;
    mealcal_db::migrate(&pool).await?;

    Ok(mealcal_db::SqliteStorage(pool))
}
