use std::time::Duration;

use autoscan_core::AppConfig;

/// Telegram channel settings. Both `bot_token` and `chat_id` must be present
/// for anything to be sent.
#[derive(Clone)]
pub struct NotifyConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    /// Records listed individually in a summary alert.
    pub top_n: usize,
}

impl NotifyConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            bot_token: config.telegram_bot_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
            base_url: config.telegram_base_url.clone(),
            timeout: Duration::from_secs(config.notify_timeout_secs),
            top_n: config.notify_top_n,
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            base_url: "https://api.telegram.org".to_string(),
            timeout: Duration::from_secs(15),
            top_n: 5,
        }
    }
}

impl std::fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "[redacted]"))
            .field("chat_id", &self.chat_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("top_n", &self.top_n)
            .finish()
    }
}
