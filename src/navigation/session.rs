//! Per-chat keyword sessions backing search result pagination.
//!
//! Only the most recent search in a chat is kept; paging buttons from an older search resolve to
//! [`ShopError::StaleSession`]. Sessions live in memory and do not survive a restart.
use crate::error::{ShopError, ShopResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    pub id: u64,
    pub keyword: String,
}

pub struct SearchSessions {
    next_id: AtomicU64,
    by_chat: RwLock<HashMap<u64, SearchSession>>,
}

impl Default for SearchSessions {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSessions {
    pub fn new() -> Self {
        // Seeded from the clock so ids minted before a restart never match ids minted after it.
        let seed = chrono::Utc::now().timestamp_millis().max(0) as u64;
        Self {
            next_id: AtomicU64::new(seed),
            by_chat: RwLock::new(HashMap::new()),
        }
    }

    /// Start a new search in `chat`, replacing any previous one.
    pub async fn open(&self, chat: u64, keyword: &str) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut map = self.by_chat.write().await;
        map.insert(
            chat,
            SearchSession {
                id,
                keyword: keyword.to_string(),
            },
        );
        tracing::debug!(target = "nav.session", chat_id = chat, session = id, "search session opened");
        id
    }

    pub async fn keyword(&self, chat: u64, session: u64) -> ShopResult<String> {
        self.by_chat
            .read()
            .await
            .get(&chat)
            .filter(|s| s.id == session)
            .map(|s| s.keyword.clone())
            .ok_or(ShopError::StaleSession)
    }
}
