//! This module defines the shared state used throughout the application.
//! It is stored as a `TypeMapKey` in Serenity's global context.

use crate::config::BotConfig;
use crate::navigation::Navigator;
use crate::scheduler::EphemeralScheduler;
use crate::services::highlights::HighlightDesk;
use serenity::model::id::{ChannelId, MessageId, UserId};
use serenity::prelude::TypeMapKey;
use std::sync::Arc;

/// The central, shared state of the application.
pub struct AppState {
    pub config: Arc<BotConfig>,
    /// Catalog access plus keyword sessions; resolves every button token.
    pub navigator: Arc<Navigator>,
    /// Deferred cleanup of everything the bot posts.
    pub scheduler: Arc<EphemeralScheduler>,
    pub highlights: Arc<HighlightDesk>,
}

impl AppState {
    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }

    pub fn is_admin(&self, user: UserId) -> bool {
        user.get() == self.config.admin_id
    }

    /// Queue sent messages for deletion after the configured delay.
    pub async fn expire(&self, channel: ChannelId, messages: &[MessageId]) {
        let ids = messages.iter().map(|m| m.get()).collect();
        self.scheduler
            .schedule(channel.get(), ids, self.config.ephemeral_delay)
            .await;
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
