use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub scraper_nav_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_accept_language: String,
    pub scraper_max_concurrent_platforms: usize,
    pub scraper_max_items: usize,
    pub scraper_max_content_chars: usize,
    /// `None` leaves the extraction backend unconfigured.
    pub openrouter_api_key: Option<String>,
    pub extract_base_url: String,
    pub extract_model: String,
    pub extract_timeout_secs: u64,
    pub extract_max_corpus_chars: usize,
    pub extract_max_tokens: u32,
    /// Both token and chat id are needed for notifications to be sent.
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_base_url: String,
    pub notify_timeout_secs: u64,
    pub notify_top_n: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("scraper_nav_timeout_secs", &self.scraper_nav_timeout_secs)
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("scraper_accept_language", &self.scraper_accept_language)
            .field(
                "scraper_max_concurrent_platforms",
                &self.scraper_max_concurrent_platforms,
            )
            .field("scraper_max_items", &self.scraper_max_items)
            .field("scraper_max_content_chars", &self.scraper_max_content_chars)
            .field(
                "openrouter_api_key",
                &self.openrouter_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("extract_base_url", &self.extract_base_url)
            .field("extract_model", &self.extract_model)
            .field("extract_timeout_secs", &self.extract_timeout_secs)
            .field("extract_max_corpus_chars", &self.extract_max_corpus_chars)
            .field("extract_max_tokens", &self.extract_max_tokens)
            .field(
                "telegram_bot_token",
                &self.telegram_bot_token.as_ref().map(|_| "[redacted]"),
            )
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("telegram_base_url", &self.telegram_base_url)
            .field("notify_timeout_secs", &self.notify_timeout_secs)
            .field("notify_top_n", &self.notify_top_n)
            .finish()
    }
}
