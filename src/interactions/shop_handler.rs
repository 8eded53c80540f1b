//! Handles all component interactions for the `shop` token family.

use super::ids::NavToken;
use super::util::{defer_component, edit_component, notify_component};
use crate::AppState;
use crate::commands::shop::ui;
use serenity::builder::EditInteractionResponse;
use serenity::model::application::ComponentInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

#[tracing::instrument(level = "debug", skip(ctx, component, app_state), fields(user_id = component.user.id.get(), cid = %component.data.custom_id))]
pub async fn handle(ctx: &Context, component: &ComponentInteraction, app_state: Arc<AppState>) {
    defer_component(ctx, component).await;

    let token = NavToken::decode(&component.data.custom_id);
    let chat = component.channel_id.get();
    match app_state.navigator.apply(chat, &token).await {
        Ok(screen) => {
            let view = ui::render(&screen);
            edit_component(
                ctx,
                component,
                screen.state(),
                EditInteractionResponse::new()
                    .embeds(view.embeds)
                    .components(view.components),
            )
            .await;
        }
        Err(e) => {
            // The message keeps showing the last good screen.
            tracing::info!(target = "nav", chat_id = chat, error = %e, "transition rejected");
            notify_component(ctx, component, e.user_message()).await;
        }
    }
}
