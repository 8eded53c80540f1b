//! Exclusion sets for the highlights broadcast, keyed by chat.
use super::init::DbPool;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

#[async_trait]
pub trait PickStore: Send + Sync {
    async fn load(&self, chat_id: u64) -> anyhow::Result<HashSet<String>>;
    /// Replace the stored set for `chat_id` with `ids`.
    async fn save(&self, chat_id: u64, ids: &HashSet<String>) -> anyhow::Result<()>;
}

#[derive(Default)]
pub struct MemoryPickStore {
    sets: RwLock<HashMap<u64, HashSet<String>>>,
}

impl MemoryPickStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PickStore for MemoryPickStore {
    async fn load(&self, chat_id: u64) -> anyhow::Result<HashSet<String>> {
        Ok(self
            .sets
            .read()
            .await
            .get(&chat_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, chat_id: u64, ids: &HashSet<String>) -> anyhow::Result<()> {
        self.sets.write().await.insert(chat_id, ids.clone());
        Ok(())
    }
}

pub struct PgPickStore {
    pool: DbPool,
}

impl PgPickStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PickStore for PgPickStore {
    async fn load(&self, chat_id: u64) -> anyhow::Result<HashSet<String>> {
        let rows = sqlx::query("SELECT product_id FROM highlight_history WHERE chat_id = $1")
            .bind(chat_id as i64)
            .fetch_all(&self.pool)
            .await?;
        let mut ids = HashSet::with_capacity(rows.len());
        for row in &rows {
            ids.insert(row.try_get::<String, _>("product_id")?);
        }
        Ok(ids)
    }

    async fn save(&self, chat_id: u64, ids: &HashSet<String>) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM highlight_history WHERE chat_id = $1")
            .bind(chat_id as i64)
            .execute(&mut *tx)
            .await?;
        let now = Utc::now();
        for id in ids {
            sqlx::query(
                "INSERT INTO highlight_history (chat_id, product_id, shown_at) VALUES ($1, $2, $3)",
            )
            .bind(chat_id as i64)
            .bind(id.as_str())
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
