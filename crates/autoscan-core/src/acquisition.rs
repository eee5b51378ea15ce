use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marketplace-specific query location derived from a [`crate::Filter`].
///
/// Always a complete, percent-encoded URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw content obtained from one platform during one run.
///
/// Produced exactly once per requested platform. A failed acquisition carries
/// empty `content` and a populated `error`; it is never retried within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionResult {
    #[serde(rename = "platformId")]
    pub platform_id: String,
    /// Display name, used to tag content for extraction.
    #[serde(rename = "platform")]
    pub platform_name: String,
    #[serde(rename = "url")]
    pub locator: Locator,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "scrapedAt")]
    pub fetched_at: DateTime<Utc>,
}

impl AcquisitionResult {
    #[must_use]
    pub fn success(
        platform_id: &str,
        platform_name: &str,
        locator: Locator,
        content: String,
    ) -> Self {
        Self {
            platform_id: platform_id.to_string(),
            platform_name: platform_name.to_string(),
            locator,
            content,
            error: None,
            fetched_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn failure(
        platform_id: &str,
        platform_name: &str,
        locator: Locator,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            platform_id: platform_id.to_string(),
            platform_name: platform_name.to_string(),
            locator,
            content: String::new(),
            error: Some(reason.into()),
            fetched_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// `true` when this result should feed the extraction corpus.
    #[must_use]
    pub fn has_usable_content(&self) -> bool {
        !self.is_failure() && !self.content.trim().is_empty()
    }
}
