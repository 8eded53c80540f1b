use crate::constants::{CMD_BROWSE_CLUBS, CMD_DAILY_HIGHLIGHTS, CMD_HELP, CMD_SEARCH};
use crate::interactions::ids::is_shop_id;
use crate::{AppState, commands, interactions};
use serenity::async_trait;
use serenity::client::Context;
use serenity::model::application::Interaction;
use serenity::model::{channel::Message, gateway::Ready, id::GuildId};
use serenity::prelude::EventHandler;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    BrowseClubs,
    Search,
    DailyHighlights,
    Help,
    Unknown,
}

impl FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CMD_BROWSE_CLUBS | "clubs" => Ok(Command::BrowseClubs),
            CMD_SEARCH | "s" => Ok(Command::Search),
            CMD_DAILY_HIGHLIGHTS | "highlights" => Ok(Command::DailyHighlights),
            CMD_HELP | "h" => Ok(Command::Help),
            _ => Ok(Command::Unknown),
        }
    }
}

pub struct Handler {
    pub allowed_guild_id: GuildId,
}

async fn app_state(ctx: &Context) -> Option<std::sync::Arc<AppState>> {
    let state = AppState::from_ctx(ctx).await;
    if state.is_none() {
        tracing::error!(target = "handler", "AppState missing from TypeMap; event dropped");
    }
    state
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Some(app_state) = app_state(&ctx).await else {
            return;
        };
        if let Interaction::Command(command) = &interaction {
            // Anyone but the operator gets silence.
            if !app_state.is_admin(command.user.id) {
                tracing::debug!(target = "auth", user_id = command.user.id.get(), cmd = %command.data.name, "ignored non-operator command");
                return;
            }
            match command.data.name.as_str() {
                CMD_BROWSE_CLUBS => {
                    commands::shop::run::browse_slash(&ctx, command, app_state).await
                }
                CMD_SEARCH => commands::shop::run::search_slash(&ctx, command, app_state).await,
                CMD_DAILY_HIGHLIGHTS => {
                    commands::shop::run::highlights_slash(&ctx, command, app_state).await
                }
                CMD_HELP => {
                    commands::help::run_slash(&ctx, command, &app_state.config.command_prefix)
                        .await
                }
                _ => {}
            }
        } else if let Interaction::Component(component) = &interaction {
            if is_shop_id(&component.data.custom_id) {
                interactions::shop_handler::handle(&ctx, component, app_state).await
            }
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.guild_id != Some(self.allowed_guild_id) || msg.author.bot {
            return;
        }
        let Some(app_state) = app_state(&ctx).await else {
            return;
        };
        let Some(command_body) = msg.content.strip_prefix(&app_state.config.command_prefix) else {
            return;
        };
        let mut args = command_body.split_whitespace();
        let Some(command_str) = args.next() else {
            return;
        };
        let command = Command::from_str(command_str).unwrap_or(Command::Unknown);
        if command == Command::Unknown || !app_state.is_admin(msg.author.id) {
            return;
        }
        let args_vec: Vec<&str> = args.collect();
        match command {
            Command::BrowseClubs => commands::shop::run::browse_prefix(&ctx, &msg, app_state).await,
            Command::Search => {
                commands::shop::run::search_prefix(&ctx, &msg, args_vec, app_state).await
            }
            Command::DailyHighlights => {
                commands::shop::run::highlights_prefix(&ctx, &msg, app_state).await
            }
            Command::Help => {
                commands::help::run_prefix(&ctx, &msg, &app_state.config.command_prefix).await
            }
            Command::Unknown => {}
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(target = "handler", user = %ready.user.name, "connected and ready");
        let commands_to_register = vec![
            commands::shop::run::register_browse(),
            commands::shop::run::register_search(),
            commands::shop::run::register_highlights(),
            commands::help::register(),
        ];
        match self
            .allowed_guild_id
            .set_commands(&ctx.http, commands_to_register)
            .await
        {
            Ok(registered) => {
                tracing::info!(target = "handler", count = registered.len(), "registered guild commands")
            }
            Err(e) => tracing::error!(target = "handler", error = ?e, "error creating guild commands"),
        }
    }
}
