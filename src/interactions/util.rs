//! Component interaction plumbing: acknowledge, replace the screen, or answer privately.
use serenity::builder::{CreateInteractionResponseFollowup, EditInteractionResponse};
use serenity::model::application::ComponentInteraction;
use serenity::prelude::Context;

/// Acknowledge a button press so the edit below can take its time. Late acks are only logged.
pub async fn defer_component(ctx: &Context, c: &ComponentInteraction) {
    if let Err(e) = c.defer(&ctx.http).await {
        tracing::debug!(target="ui.defer", cid=%c.data.custom_id, error=?e, "defer failed (already acknowledged?)");
    }
}

/// Replace the message the button sits on. `tag` names the screen in the log line.
pub async fn edit_component(
    ctx: &Context,
    c: &ComponentInteraction,
    tag: &str,
    builder: EditInteractionResponse,
) {
    if let Err(e) = c.edit_response(&ctx.http, builder).await {
        tracing::error!(target="ui.edit", cid=%c.data.custom_id, tag=%tag, error=?e, "edit_response failed");
    }
}

/// Private notice to the presser; the message the button sits on is left untouched.
pub async fn notify_component(ctx: &Context, c: &ComponentInteraction, text: &str) {
    let followup = CreateInteractionResponseFollowup::new()
        .content(text)
        .ephemeral(true);
    if let Err(e) = c.create_followup(&ctx.http, followup).await {
        tracing::error!(target="ui.followup", cid=%c.data.custom_id, error=?e, "followup failed");
    }
}
