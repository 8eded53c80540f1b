//! Help menu listing the storefront commands.

use crate::constants::{CMD_BROWSE_CLUBS, CMD_DAILY_HIGHLIGHTS, CMD_HELP, CMD_SEARCH};
use crate::ui::style::COLOR_CATALOG;
use serenity::builder::{
    CreateCommand, CreateEmbed, CreateEmbedFooter, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage,
};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::prelude::*;

struct CommandInfo {
    name: &'static str,
    description: &'static str,
    usage: &'static [&'static str],
}

const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: CMD_BROWSE_CLUBS,
        description: "Pick a club, page through its items, choose a size and get a checkout link.",
        usage: &["browse-clubs"],
    },
    CommandInfo {
        name: CMD_SEARCH,
        description: "Find in-stock items whose title contains the keyword.",
        usage: &["search <keyword>"],
    },
    CommandInfo {
        name: CMD_DAILY_HIGHLIGHTS,
        description: "Post a random selection of items that have not been shown here recently.",
        usage: &["daily-highlights"],
    },
    CommandInfo {
        name: CMD_HELP,
        description: "Shows this help menu.",
        usage: &["help"],
    },
];

/// Names of every documented command, in menu order.
pub fn all_command_names() -> Vec<&'static str> {
    COMMANDS.iter().map(|c| c.name).collect()
}

pub fn register() -> CreateCommand {
    CreateCommand::new(CMD_HELP).description("Shows the storefront commands.")
}

fn help_embed(prefix: &str) -> CreateEmbed {
    let fields = COMMANDS.iter().map(|c| {
        let usage = c
            .usage
            .iter()
            .map(|u| format!("`/{u}` · `{prefix}{u}`"))
            .collect::<Vec<_>>()
            .join("\n");
        (c.name, format!("{}\n{}", c.description, usage), false)
    });
    CreateEmbed::new()
        .title("🛍 Storefront commands")
        .fields(fields)
        .footer(CreateEmbedFooter::new(
            "Product menus and highlights are removed automatically after a while.",
        ))
        .color(COLOR_CATALOG)
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction, prefix: &str) {
    let response = CreateInteractionResponseMessage::new()
        .embed(help_embed(prefix))
        .ephemeral(true);
    if let Err(e) = interaction
        .create_response(&ctx.http, CreateInteractionResponse::Message(response))
        .await
    {
        tracing::error!(target = "ui.help", error = ?e, "help response failed");
    }
}

pub async fn run_prefix(ctx: &Context, msg: &Message, prefix: &str) {
    let builder = CreateMessage::new()
        .embed(help_embed(prefix))
        .reference_message(msg);
    if let Err(e) = msg.channel_id.send_message(&ctx.http, builder).await {
        tracing::error!(target = "ui.help", error = ?e, "help message failed");
    }
}
