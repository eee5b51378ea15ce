use serde::Deserialize;
use serde_json::json;

use crate::config::ExtractConfig;
use crate::error::ExtractError;

const REFERER: &str = "http://localhost:3001";
const TITLE: &str = "autoscan";

/// Minimal OpenRouter chat-completions client: one user message in, the
/// first choice's text out.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenRouterClient {
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, config: &ExtractConfig) -> Result<Self, ExtractError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout_secs: config.timeout.as_secs(),
        })
    }

    /// Sends `prompt` as a single user message and returns the reply text.
    ///
    /// Exactly one request is made; nothing is retried.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Timeout`] if the backend does not answer in time.
    /// - [`ExtractError::Status`] for any non-2xx response.
    /// - [`ExtractError::Deserialize`] if the body is not a chat completion.
    /// - [`ExtractError::EmptyResponse`] if the completion carries no text.
    pub async fn complete(&self, prompt: &str) -> Result<String, ExtractError> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", TITLE)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await.map_err(|e| self.map_send_error(e))?;
        let parsed: ChatResponse =
            serde_json::from_str(&raw).map_err(|source| ExtractError::Deserialize {
                context: "chat completion response".to_string(),
                source,
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ExtractError::EmptyResponse)
    }

    fn map_send_error(&self, e: reqwest::Error) -> ExtractError {
        if e.is_timeout() {
            ExtractError::Timeout {
                secs: self.timeout_secs,
            }
        } else {
            ExtractError::Http(e)
        }
    }
}
