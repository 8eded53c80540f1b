use catalog_bot::config::BotConfig;
use std::collections::HashMap;
use std::time::Duration;

fn base() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("DISCORD_TOKEN", "token"),
        ("SERVER_ID", "1234"),
        ("ADMIN_ID", "5678"),
        ("CATALOG_URL", "https://feeds.example.com/products.csv"),
        ("CHECKOUT_BASE", "https://shop.example.com/checkout/"),
    ])
}

fn load(env: &HashMap<&'static str, &'static str>) -> anyhow::Result<BotConfig> {
    BotConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()))
}

#[test]
fn defaults_apply() {
    let cfg = load(&base()).unwrap();
    assert_eq!(cfg.guild_id, 1234);
    assert_eq!(cfg.admin_id, 5678);
    assert_eq!(cfg.fetch_timeout, Duration::from_secs(12));
    assert_eq!(cfg.ephemeral_delay, Duration::from_secs(300));
    assert_eq!(cfg.highlight_count, 5);
    assert_eq!(cfg.command_prefix, "!");
    assert!(cfg.database_url.is_none());
}

#[test]
fn overrides_are_read() {
    let mut env = base();
    env.insert("EPHEMERAL_DELETE_SECS", "30");
    env.insert("HIGHLIGHT_COUNT", "9");
    env.insert("COMMAND_PREFIX", "?");
    env.insert("DATABASE_URL", "postgres://localhost/shop");
    let cfg = load(&env).unwrap();
    assert_eq!(cfg.ephemeral_delay, Duration::from_secs(30));
    assert_eq!(cfg.highlight_count, 9);
    assert_eq!(cfg.command_prefix, "?");
    assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/shop"));
}

#[test]
fn missing_token_is_an_error() {
    let mut env = base();
    env.remove("DISCORD_TOKEN");
    let err = load(&env).unwrap_err();
    assert!(err.to_string().contains("DISCORD_TOKEN"));
}

#[test]
fn bad_values_are_rejected() {
    for (key, value) in [
        ("SERVER_ID", "abc"),
        ("ADMIN_ID", "0"),
        ("CATALOG_URL", "ftp://feeds.example.com/x.csv"),
        ("CHECKOUT_BASE", "not a url"),
        ("HIGHLIGHT_COUNT", "0"),
        ("FETCH_TIMEOUT_SECS", "-3"),
    ] {
        let mut env = base();
        env.insert(key, value);
        assert!(load(&env).is_err(), "{key}={value} should be rejected");
    }
}

#[test]
fn zero_fetch_timeout_is_raised_to_one_second() {
    let mut env = base();
    env.insert("FETCH_TIMEOUT_SECS", "0");
    assert_eq!(load(&env).unwrap().fetch_timeout, Duration::from_secs(1));
}
