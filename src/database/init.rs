//! Pool creation and schema bootstrap.
use anyhow::Context as _;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

/// A type alias for the database connection pool (`Pool<Postgres>`).
pub type DbPool = Pool<Postgres>;

pub async fn connect(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(database_url)
        .await
        .context("connecting to Postgres")?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

pub async fn ensure_schema(pool: &DbPool) -> anyhow::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS highlight_history (
            chat_id BIGINT NOT NULL,
            product_id TEXT NOT NULL,
            shown_at TIMESTAMPTZ NOT NULL,
            PRIMARY KEY (chat_id, product_id)
        )",
    )
    .execute(pool)
    .await
    .context("creating highlight_history table")?;
    Ok(())
}
