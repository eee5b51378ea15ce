use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_EXTRACT_MODEL: &str = "anthropic/claude-sonnet-4-20250514";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Nothing is required: every collaborator that lacks credentials runs in a
/// degraded (disabled) mode instead of failing startup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("AUTOSCAN_ENV", "development"))?;
    let bind_addr = parse_addr("AUTOSCAN_BIND_ADDR", "0.0.0.0:3001")?;
    let log_level = or_default("AUTOSCAN_LOG_LEVEL", "info");

    let scraper_nav_timeout_secs = parse_u64("AUTOSCAN_SCRAPER_NAV_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default("AUTOSCAN_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_accept_language =
        or_default("AUTOSCAN_SCRAPER_ACCEPT_LANGUAGE", "de-DE,de;q=0.9");
    let scraper_max_concurrent_platforms =
        parse_usize("AUTOSCAN_SCRAPER_MAX_CONCURRENT_PLATFORMS", "5")?;
    let scraper_max_items = parse_usize("AUTOSCAN_SCRAPER_MAX_ITEMS", "20")?;
    let scraper_max_content_chars = parse_usize("AUTOSCAN_SCRAPER_MAX_CONTENT_CHARS", "50000")?;

    let openrouter_api_key = optional("OPENROUTER_API_KEY");
    let extract_base_url = or_default("AUTOSCAN_EXTRACT_BASE_URL", "https://openrouter.ai/api/v1");
    let extract_model = or_default("AUTOSCAN_EXTRACT_MODEL", DEFAULT_EXTRACT_MODEL);
    let extract_timeout_secs = parse_u64("AUTOSCAN_EXTRACT_TIMEOUT_SECS", "60")?;
    let extract_max_corpus_chars = parse_usize("AUTOSCAN_EXTRACT_MAX_CORPUS_CHARS", "80000")?;
    let extract_max_tokens = parse_u32("AUTOSCAN_EXTRACT_MAX_TOKENS", "8000")?;

    let telegram_bot_token = optional("TELEGRAM_BOT_TOKEN");
    let telegram_chat_id = optional("TELEGRAM_CHAT_ID");
    let telegram_base_url = or_default("AUTOSCAN_TELEGRAM_BASE_URL", "https://api.telegram.org");
    let notify_timeout_secs = parse_u64("AUTOSCAN_NOTIFY_TIMEOUT_SECS", "15")?;
    let notify_top_n = parse_usize("AUTOSCAN_NOTIFY_TOP_N", "5")?;

    if scraper_nav_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "AUTOSCAN_SCRAPER_NAV_TIMEOUT_SECS".to_string(),
            reason: "must be at least 1 second".to_string(),
        });
    }

    if extract_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "AUTOSCAN_EXTRACT_TIMEOUT_SECS".to_string(),
            reason: "must be at least 1 second".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        scraper_nav_timeout_secs,
        scraper_user_agent,
        scraper_accept_language,
        scraper_max_concurrent_platforms,
        scraper_max_items,
        scraper_max_content_chars,
        openrouter_api_key,
        extract_base_url,
        extract_model,
        extract_timeout_secs,
        extract_max_corpus_chars,
        extract_max_tokens,
        telegram_bot_token,
        telegram_chat_id,
        telegram_base_url,
        notify_timeout_secs,
        notify_top_n,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "AUTOSCAN_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
