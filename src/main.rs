use anyhow::Context as _;
use async_trait::async_trait;
use catalog_bot::catalog::HttpCatalogSource;
use catalog_bot::config::BotConfig;
use catalog_bot::database::highlights::{MemoryPickStore, PgPickStore, PickStore};
use catalog_bot::handler::Handler;
use catalog_bot::navigation::{Navigator, SearchSessions};
use catalog_bot::scheduler::{EphemeralScheduler, MessageDeleter, ShutdownMode};
use catalog_bot::services::highlights::HighlightDesk;
use catalog_bot::{AppState, database};
use serenity::http::Http;
use serenity::model::gateway::GatewayIntents;
use serenity::model::id::{ChannelId, GuildId, MessageId};
use serenity::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Deletes through the bot's REST client.
struct DiscordDeleter {
    http: Arc<Http>,
}

#[async_trait]
impl MessageDeleter for DiscordDeleter {
    async fn delete(&self, chat_id: u64, message_id: u64) -> anyhow::Result<()> {
        ChannelId::new(chat_id)
            .delete_message(&self.http, MessageId::new(message_id))
            .await?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine when the variables come from the real environment.
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(BotConfig::from_env().context("loading configuration")?);

    let source = HttpCatalogSource::new(config.catalog_url.clone(), config.fetch_timeout)?;
    let navigator = Navigator::new(
        Arc::new(source),
        Arc::new(SearchSessions::new()),
        config.checkout_base.clone(),
        config.fetch_timeout,
    );

    let pick_store: Arc<dyn PickStore> = match &config.database_url {
        Some(url) => {
            let pool = database::init::connect(url).await?;
            tracing::info!(target = "startup", "highlight history stored in Postgres");
            Arc::new(PgPickStore::new(pool))
        }
        None => {
            tracing::info!(target = "startup", "DATABASE_URL unset; highlight history kept in memory");
            Arc::new(MemoryPickStore::new())
        }
    };

    let scheduler = Arc::new(EphemeralScheduler::new());
    let app_state = Arc::new(AppState {
        config: config.clone(),
        navigator: Arc::new(navigator),
        scheduler: scheduler.clone(),
        highlights: Arc::new(HighlightDesk::new(pick_store)),
    });

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler {
            allowed_guild_id: GuildId::new(config.guild_id),
        })
        .await
        .context("creating the Discord client")?;

    {
        let mut data = client.data.write().await;
        data.insert::<AppState>(app_state);
    }

    let deleter = DiscordDeleter {
        http: client.http.clone(),
    };
    let drain = {
        let scheduler = scheduler.clone();
        tokio::spawn(async move { scheduler.run(deleter).await })
    };

    let shard_manager = client.shard_manager.clone();
    let shutdown_scheduler = scheduler.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!(target = "shutdown", "ctrl-c received; flushing pending deletions");
            shutdown_scheduler.shutdown(ShutdownMode::Flush);
            shard_manager.shutdown_all().await;
        }
    });

    let result = client.start().await;
    scheduler.shutdown(ShutdownMode::Flush);
    drain.await.ok();
    result.context("Discord client error")?;
    Ok(())
}
