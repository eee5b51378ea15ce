use std::sync::Arc;

use async_trait::async_trait;
use autoscan_core::Locator;

use crate::error::AcquireError;
use crate::session::SessionHost;
use crate::text::{page_text, ContentLimits};

/// Turns a locator into the visible text of the page behind it.
///
/// Implementations own every DOM heuristic. Callers only see text or an error.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_text(&self, locator: &Locator) -> Result<String, AcquireError>;
}

/// Page source over plain HTTP. Pages are fetched through the shared
/// [`SessionHost`] and reduced with [`page_text`]. No JavaScript is executed.
pub struct HttpPageSource {
    host: Arc<SessionHost>,
    limits: ContentLimits,
}

impl HttpPageSource {
    #[must_use]
    pub fn new(host: Arc<SessionHost>, limits: ContentLimits) -> Self {
        Self { host, limits }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_text(&self, locator: &Locator) -> Result<String, AcquireError> {
        let client = self.host.session().await?;
        let url = locator.as_str();

        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AcquireError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);
        if let Some(content_type) = content_type {
            if !content_type.contains("html") && !content_type.starts_with("text/") {
                return Err(AcquireError::NotHtml {
                    content_type,
                    url: url.to_string(),
                });
            }
        }

        let body = response.text().await?;
        Ok(page_text(&body, self.limits))
    }
}
