//! Implements the run logic for `/browse-clubs`, `/search` and `/daily-highlights`.
//!
//! Access control happens in the handler; by the time these run the caller is the operator.

use super::ui::{self, View};
use crate::constants::{CMD_BROWSE_CLUBS, CMD_DAILY_HIGHLIGHTS, CMD_SEARCH};
use crate::error::{ShopError, ShopResult};
use crate::navigation::Screen;
use crate::ui::buttons::Btn;
use crate::AppState;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serenity::builder::{
    CreateActionRow, CreateCommand, CreateCommandOption, CreateMessage, EditInteractionResponse,
};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::model::channel::Message;
use serenity::model::id::{ChannelId, MessageId};
use serenity::prelude::*;
use std::sync::Arc;

pub const SEARCH_USAGE: &str = "Use:\n/search barcelona";

pub fn register_browse() -> CreateCommand {
    CreateCommand::new(CMD_BROWSE_CLUBS).description("Browse in-stock items club by club.")
}

pub fn register_search() -> CreateCommand {
    CreateCommand::new(CMD_SEARCH)
        .description("Search in-stock items by title.")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "keyword", "Words in the title")
                .required(true),
        )
}

pub fn register_highlights() -> CreateCommand {
    CreateCommand::new(CMD_DAILY_HIGHLIGHTS)
        .description("Post a fresh selection of items not shown recently.")
}

fn view_for(result: ShopResult<Screen>, tag: &str) -> View {
    match result {
        Ok(screen) => ui::render(&screen),
        Err(e) => {
            tracing::warn!(target = "shop.command", tag, error = %e, "command failed");
            View::notice("Catalog", e.user_message())
        }
    }
}

/// Edit the deferred slash response and queue it for cleanup.
async fn respond_slash(
    ctx: &Context,
    interaction: &CommandInteraction,
    app: &AppState,
    view: View,
    tag: &str,
) {
    let builder = EditInteractionResponse::new()
        .embeds(view.embeds)
        .components(view.components);
    match interaction.edit_response(&ctx.http, builder).await {
        Ok(sent) => app.expire(sent.channel_id, &[sent.id]).await,
        Err(e) => {
            tracing::error!(target = "ui.edit", tag, error = ?e, "edit_response failed");
        }
    }
}

async fn respond_prefix(ctx: &Context, msg: &Message, app: &AppState, view: View, tag: &str) {
    let builder = CreateMessage::new()
        .embeds(view.embeds)
        .components(view.components)
        .reference_message(msg);
    match msg.channel_id.send_message(&ctx.http, builder).await {
        Ok(sent) => app.expire(sent.channel_id, &[sent.id]).await,
        Err(e) => {
            tracing::error!(target = "ui.send", tag, error = ?e, "send_message failed");
        }
    }
}

fn keyword_option(interaction: &CommandInteraction) -> String {
    interaction
        .data
        .options
        .iter()
        .find(|o| o.name == "keyword")
        .and_then(|o| o.value.as_str())
        .unwrap_or_default()
        .trim()
        .to_string()
}

pub async fn browse_slash(ctx: &Context, interaction: &CommandInteraction, app: Arc<AppState>) {
    interaction.defer(&ctx.http).await.ok();
    let view = view_for(app.navigator.browse_clubs().await, CMD_BROWSE_CLUBS);
    respond_slash(ctx, interaction, &app, view, CMD_BROWSE_CLUBS).await;
}

pub async fn browse_prefix(ctx: &Context, msg: &Message, app: Arc<AppState>) {
    let view = view_for(app.navigator.browse_clubs().await, CMD_BROWSE_CLUBS);
    respond_prefix(ctx, msg, &app, view, CMD_BROWSE_CLUBS).await;
}

pub async fn search_slash(ctx: &Context, interaction: &CommandInteraction, app: Arc<AppState>) {
    interaction.defer(&ctx.http).await.ok();
    let keyword = keyword_option(interaction);
    let view = if keyword.is_empty() {
        View::notice("Search", SEARCH_USAGE)
    } else {
        let chat = interaction.channel_id.get();
        view_for(app.navigator.search(chat, &keyword).await, CMD_SEARCH)
    };
    respond_slash(ctx, interaction, &app, view, CMD_SEARCH).await;
}

pub async fn search_prefix(ctx: &Context, msg: &Message, args: Vec<&str>, app: Arc<AppState>) {
    let keyword = args.join(" ").trim().to_string();
    let view = if keyword.is_empty() {
        View::notice("Search", SEARCH_USAGE)
    } else {
        view_for(
            app.navigator.search(msg.channel_id.get(), &keyword).await,
            CMD_SEARCH,
        )
    };
    respond_prefix(ctx, msg, &app, view, CMD_SEARCH).await;
}

/// Fetch, draw and post highlight cards to `channel`. Returns the ids of the posted cards.
async fn post_highlights(
    ctx: &Context,
    channel: ChannelId,
    app: &AppState,
) -> anyhow::Result<Vec<MessageId>> {
    let snapshot = app.navigator.snapshot().await?;
    let mut rng = StdRng::from_os_rng();
    let products = app
        .highlights
        .draw(channel.get(), &snapshot, app.config.highlight_count, &mut rng)
        .await?;

    let mut sent = Vec::with_capacity(products.len());
    for p in &products {
        let mut builder = CreateMessage::new().embed(ui::highlight_embed(p));
        if url::Url::parse(&p.link).is_ok() {
            builder = builder.components(vec![CreateActionRow::Buttons(vec![Btn::link(
                &p.link, "View item",
            )])]);
        }
        match channel.send_message(&ctx.http, builder).await {
            Ok(m) => sent.push(m.id),
            Err(e) => {
                tracing::error!(target = "highlights", product = %p.id, error = ?e, "failed to post highlight");
            }
        }
    }
    Ok(sent)
}

fn highlights_failure(e: &anyhow::Error) -> &'static str {
    tracing::warn!(target = "highlights", error = %e, "highlights failed");
    e.downcast_ref::<ShopError>()
        .map(ShopError::user_message)
        .unwrap_or("⚠️ Highlights could not be prepared right now.")
}

pub async fn highlights_slash(ctx: &Context, interaction: &CommandInteraction, app: Arc<AppState>) {
    interaction.defer(&ctx.http).await.ok();
    let channel = interaction.channel_id;
    let summary = match post_highlights(ctx, channel, &app).await {
        Ok(ids) => {
            app.expire(channel, &ids).await;
            format!("🔥 Daily highlights: {} items posted.", ids.len())
        }
        Err(e) => highlights_failure(&e).to_string(),
    };
    match interaction
        .edit_response(&ctx.http, EditInteractionResponse::new().content(summary))
        .await
    {
        Ok(m) => app.expire(channel, &[m.id]).await,
        Err(e) => {
            tracing::error!(target = "ui.edit", tag = CMD_DAILY_HIGHLIGHTS, error = ?e, "edit_response failed");
        }
    }
}

pub async fn highlights_prefix(ctx: &Context, msg: &Message, app: Arc<AppState>) {
    match post_highlights(ctx, msg.channel_id, &app).await {
        Ok(ids) => app.expire(msg.channel_id, &ids).await,
        Err(e) => {
            let view = View::notice("Daily highlights", highlights_failure(&e));
            respond_prefix(ctx, msg, &app, view, CMD_DAILY_HIGHLIGHTS).await;
        }
    }
}
