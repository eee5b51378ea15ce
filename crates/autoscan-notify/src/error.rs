use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Telegram is not configured (TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID are required)")]
    Unconfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Telegram API error {status}: {description}")]
    Api { status: u16, description: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
