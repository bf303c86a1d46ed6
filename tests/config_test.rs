use std::collections::HashMap;

use aoe2bot::config::{Config, ConfigError};

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn complete() -> HashMap<String, String> {
    env(&[
        ("DISCORD_BOT_TOKEN", "token"),
        ("DISCORD_BOT_TOKEN_DEV", "dev-token"),
        ("TAUNT_SPACE", "aoe2taunts"),
        ("DIGITALOCEAN_SPACES_KEY_ID", "key"),
        ("DIGITALOCEAN_SPACES_SECRET", "secret"),
    ])
}

#[test]
fn test_config_defaults() {
    let vars = complete();
    let config = Config::from_lookup(false, |k| vars.get(k).cloned()).unwrap();

    assert_eq!(config.discord_token, "token");
    assert_eq!(config.prefix, "!");
    assert_eq!(config.storage.bucket, "aoe2taunts");
    assert_eq!(config.storage.region, "nyc3");
    assert_eq!(config.storage.endpoint, "https://nyc3.digitaloceanspaces.com");
    assert_eq!(config.storage.manifest_key, "manifest.json");
    assert_eq!(config.stats_api_url, "https://aoe2.net/api");
    assert_eq!(config.ffmpeg_path, "ffmpeg");
}

#[test]
fn test_debug_uses_dev_token_and_prefix() {
    let vars = complete();
    let config = Config::from_lookup(true, |k| vars.get(k).cloned()).unwrap();

    assert_eq!(config.discord_token, "dev-token");
    assert_eq!(config.prefix, "$");
}

#[test]
fn test_region_drives_endpoint() {
    let mut vars = complete();
    vars.insert("DIGITALOCEAN_SPACES_REGION".to_string(), "ams3".to_string());
    let config = Config::from_lookup(false, |k| vars.get(k).cloned()).unwrap();

    assert_eq!(config.storage.endpoint, "https://ams3.digitaloceanspaces.com");
}

#[test]
fn test_config_missing_token() {
    let mut vars = complete();
    vars.remove("DISCORD_BOT_TOKEN");
    let err = Config::from_lookup(false, |k| vars.get(k).cloned()).unwrap_err();

    assert_eq!(err, ConfigError::Missing("DISCORD_BOT_TOKEN"));
    assert!(err.to_string().contains("DISCORD_BOT_TOKEN"));
}

#[test]
fn test_config_blank_secret_is_missing() {
    let mut vars = complete();
    vars.insert("DIGITALOCEAN_SPACES_SECRET".to_string(), "  ".to_string());
    let err = Config::from_lookup(false, |k| vars.get(k).cloned()).unwrap_err();

    assert_eq!(err, ConfigError::Missing("DIGITALOCEAN_SPACES_SECRET"));
}
