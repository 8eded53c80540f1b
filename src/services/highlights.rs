//! Highlights broadcast: picks unseen products for a chat and records them as shown.
use crate::catalog::{CatalogSnapshot, Product};
use crate::database::highlights::PickStore;
use crate::picker;
use rand::Rng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::instrument;

pub struct HighlightDesk {
    store: Arc<dyn PickStore>,
    /// Serializes load → pick → save so concurrent broadcasts cannot double-count.
    gate: Mutex<()>,
}

impl HighlightDesk {
    pub fn new(store: Arc<dyn PickStore>) -> Self {
        Self {
            store,
            gate: Mutex::new(()),
        }
    }

    /// Choose up to `count` products from `snapshot` that `chat_id` has not been shown since the
    /// last reset, and persist the updated exclusion set before returning them.
    #[instrument(level = "debug", skip(self, snapshot, rng), fields(pool = snapshot.len()))]
    pub async fn draw<R>(
        &self,
        chat_id: u64,
        snapshot: &CatalogSnapshot,
        count: usize,
        rng: &mut R,
    ) -> anyhow::Result<Vec<Product>>
    where
        R: Rng + Send + ?Sized,
    {
        let _guard = self.gate.lock().await;
        let excluded = self.store.load(chat_id).await?;
        let pool = snapshot.ids();
        let (selected, next_excluded) = picker::pick(&pool, count, &excluded, rng);
        self.store.save(chat_id, &next_excluded).await?;
        tracing::info!(target = "highlights", chat_id, picked = selected.len(), seen = next_excluded.len(), "highlights drawn");

        Ok(selected
            .iter()
            .filter_map(|id| snapshot.products().iter().find(|p| &p.id == id))
            .cloned()
            .collect())
    }
}
