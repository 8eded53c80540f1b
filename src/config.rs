//! Runtime configuration read from the environment (optionally seeded from `.env`).
use crate::constants::{
    DEFAULT_COMMAND_PREFIX, DEFAULT_EPHEMERAL_DELETE_SECS, DEFAULT_FETCH_TIMEOUT_SECS,
    DEFAULT_HIGHLIGHT_COUNT,
};
use anyhow::{Context as _, bail};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub guild_id: u64,
    /// The single operator allowed to run commands.
    pub admin_id: u64,
    pub catalog_url: Url,
    pub checkout_base: Url,
    pub database_url: Option<String>,
    pub fetch_timeout: Duration,
    pub ephemeral_delay: Duration,
    pub highlight_count: usize,
    pub command_prefix: String,
}

impl BotConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| -> anyhow::Result<String> {
            match lookup(key) {
                Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
                _ => bail!("missing required setting {key}"),
            }
        };
        let parsed_or = |key: &str, default: u64| -> anyhow::Result<u64> {
            match lookup(key) {
                Some(v) if !v.trim().is_empty() => v
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("{key} must be a non-negative integer")),
                _ => Ok(default),
            }
        };

        let catalog_url = parse_url("CATALOG_URL", &required("CATALOG_URL")?)?;
        let checkout_base = parse_url("CHECKOUT_BASE", &required("CHECKOUT_BASE")?)?;
        let highlight_count = parsed_or("HIGHLIGHT_COUNT", DEFAULT_HIGHLIGHT_COUNT as u64)?;
        if highlight_count == 0 {
            bail!("HIGHLIGHT_COUNT must be at least 1");
        }

        Ok(Self {
            discord_token: required("DISCORD_TOKEN")?,
            guild_id: parse_id("SERVER_ID", &required("SERVER_ID")?)?,
            admin_id: parse_id("ADMIN_ID", &required("ADMIN_ID")?)?,
            catalog_url,
            checkout_base,
            database_url: lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()),
            fetch_timeout: Duration::from_secs(
                parsed_or("FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?.max(1),
            ),
            ephemeral_delay: Duration::from_secs(parsed_or(
                "EPHEMERAL_DELETE_SECS",
                DEFAULT_EPHEMERAL_DELETE_SECS,
            )?),
            highlight_count: highlight_count as usize,
            command_prefix: lookup("COMMAND_PREFIX")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string()),
        })
    }
}

fn parse_id(key: &str, raw: &str) -> anyhow::Result<u64> {
    let id = u64::from_str(raw).with_context(|| format!("{key} must be a numeric Discord id"))?;
    if id == 0 {
        bail!("{key} must be non-zero");
    }
    Ok(id)
}

fn parse_url(key: &str, raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("{key} is not a valid URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("{key} must be an http(s) URL");
    }
    Ok(url)
}
