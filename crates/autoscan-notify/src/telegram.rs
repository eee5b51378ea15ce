use serde::Deserialize;
use serde_json::json;

use crate::config::NotifyConfig;
use crate::error::NotifyError;

/// Telegram Bot API client bound to a single chat.
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    chat_id: String,
    timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client cannot be built.
    pub fn new(
        token: impl Into<String>,
        chat_id: impl Into<String>,
        config: &NotifyConfig,
    ) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
            timeout_secs: config.timeout.as_secs(),
        })
    }

    /// Sends `text` as a `MarkdownV2` message.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::Timeout`] if Telegram does not answer in time.
    /// - [`NotifyError::Api`] if Telegram rejects the message.
    /// - [`NotifyError::Http`] on transport failures.
    pub async fn send_message(
        &self,
        text: &str,
        disable_web_page_preview: bool,
    ) -> Result<(), NotifyError> {
        let body = json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "MarkdownV2",
            "disable_web_page_preview": disable_web_page_preview,
        });

        // The bot token is part of the path; keep it out of error messages.
        let response = self
            .http
            .post(format!("{}/bot{}/sendMessage", self.base_url, self.token))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let parsed = serde_json::from_str::<ApiResponse>(&raw);
        match parsed {
            Ok(api) if status.is_success() && api.ok => Ok(()),
            Ok(api) => Err(NotifyError::Api {
                status: status.as_u16(),
                description: api.description.unwrap_or_else(|| "no description".to_string()),
            }),
            Err(_) if !status.is_success() => Err(NotifyError::Api {
                status: status.as_u16(),
                description: raw,
            }),
            Err(source) => Err(NotifyError::Deserialize {
                context: "sendMessage response".to_string(),
                source,
            }),
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> NotifyError {
        if e.is_timeout() {
            NotifyError::Timeout {
                secs: self.timeout_secs,
            }
        } else {
            NotifyError::Http(e.without_url())
        }
    }
}
