use std::time::Duration;

use autoscan_core::{AppConfig, DEFAULT_USER_AGENT};

use crate::text::ContentLimits;

/// Acquisition settings derived from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Upper bound on one platform's navigation, fetch and text extraction.
    pub nav_timeout: Duration,
    pub user_agent: String,
    pub accept_language: String,
    /// Orchestrator parallelism. Values below 1 are treated as 1.
    pub max_concurrent_platforms: usize,
    pub limits: ContentLimits,
}

impl ScraperConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            nav_timeout: Duration::from_secs(config.scraper_nav_timeout_secs),
            user_agent: config.scraper_user_agent.clone(),
            accept_language: config.scraper_accept_language.clone(),
            max_concurrent_platforms: config.scraper_max_concurrent_platforms,
            limits: ContentLimits {
                max_items: config.scraper_max_items,
                max_chars: config.scraper_max_content_chars,
            },
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            nav_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "de-DE,de;q=0.9".to_string(),
            max_concurrent_platforms: 5,
            limits: ContentLimits::default(),
        }
    }
}
