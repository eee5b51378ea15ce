use std::time::Duration;

use autoscan_core::{AppConfig, DEFAULT_EXTRACT_MODEL};

/// Structuring backend settings. `api_key = None` leaves the backend
/// unconfigured; extraction then yields nothing without any network call.
#[derive(Clone)]
pub struct ExtractConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub max_corpus_chars: usize,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl ExtractConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.openrouter_api_key.clone(),
            base_url: config.extract_base_url.clone(),
            model: config.extract_model.clone(),
            timeout: Duration::from_secs(config.extract_timeout_secs),
            max_corpus_chars: config.extract_max_corpus_chars,
            max_tokens: config.extract_max_tokens,
            ..Self::default()
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: DEFAULT_EXTRACT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
            max_corpus_chars: 80_000,
            max_tokens: 8000,
            temperature: 0.1,
        }
    }
}

impl std::fmt::Debug for ExtractConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("max_corpus_chars", &self.max_corpus_chars)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}
