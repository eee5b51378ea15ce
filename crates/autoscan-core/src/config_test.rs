use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "AUTOSCAN_ENV"));
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3001");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.scraper_nav_timeout_secs, 30);
    assert_eq!(cfg.scraper_accept_language, "de-DE,de;q=0.9");
    assert_eq!(cfg.scraper_max_concurrent_platforms, 5);
    assert_eq!(cfg.scraper_max_items, 20);
    assert_eq!(cfg.scraper_max_content_chars, 50_000);
    assert_eq!(cfg.openrouter_api_key, None);
    assert_eq!(cfg.extract_base_url, "https://openrouter.ai/api/v1");
    assert_eq!(cfg.extract_model, DEFAULT_EXTRACT_MODEL);
    assert_eq!(cfg.extract_timeout_secs, 60);
    assert_eq!(cfg.extract_max_corpus_chars, 80_000);
    assert_eq!(cfg.extract_max_tokens, 8000);
    assert_eq!(cfg.telegram_bot_token, None);
    assert_eq!(cfg.telegram_chat_id, None);
    assert_eq!(cfg.telegram_base_url, "https://api.telegram.org");
    assert_eq!(cfg.notify_timeout_secs, 15);
    assert_eq!(cfg.notify_top_n, 5);
}

#[test]
fn build_app_config_reads_credentials() {
    let mut map = HashMap::new();
    map.insert("OPENROUTER_API_KEY", "sk-or-test");
    map.insert("TELEGRAM_BOT_TOKEN", "123:abc");
    map.insert("TELEGRAM_CHAT_ID", "  -10042  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.openrouter_api_key.as_deref(), Some("sk-or-test"));
    assert_eq!(cfg.telegram_bot_token.as_deref(), Some("123:abc"));
    assert_eq!(cfg.telegram_chat_id.as_deref(), Some("-10042"));
}

#[test]
fn build_app_config_treats_blank_credentials_as_absent() {
    let mut map = HashMap::new();
    map.insert("OPENROUTER_API_KEY", "   ");
    map.insert("TELEGRAM_BOT_TOKEN", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.openrouter_api_key, None);
    assert_eq!(cfg.telegram_bot_token, None);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("AUTOSCAN_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AUTOSCAN_BIND_ADDR"),
        "expected InvalidEnvVar(AUTOSCAN_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_environment() {
    let mut map = HashMap::new();
    map.insert("AUTOSCAN_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AUTOSCAN_ENV"),
        "expected InvalidEnvVar(AUTOSCAN_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_non_numeric_timeout() {
    let mut map = HashMap::new();
    map.insert("AUTOSCAN_SCRAPER_NAV_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AUTOSCAN_SCRAPER_NAV_TIMEOUT_SECS"),
        "got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_extract_timeout() {
    let mut map = HashMap::new();
    map.insert("AUTOSCAN_EXTRACT_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AUTOSCAN_EXTRACT_TIMEOUT_SECS"),
        "got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_secrets() {
    let mut map = HashMap::new();
    map.insert("OPENROUTER_API_KEY", "sk-or-secret");
    map.insert("TELEGRAM_BOT_TOKEN", "999:top-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("sk-or-secret"));
    assert!(!debug.contains("top-secret"));
    assert!(debug.contains("[redacted]"));
}
