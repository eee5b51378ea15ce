use tokio::sync::Mutex;

use crate::config::ScraperConfig;
use crate::error::AcquireError;

/// Shared browsing-session host.
///
/// Holds at most one HTTP session. The session is built on first use, handed
/// out as a cheap clone to each acquisition, and dropped by [`Self::shutdown`].
/// A later acquisition provisions a fresh one.
#[derive(Debug)]
pub struct SessionHost {
    user_agent: String,
    accept_language: String,
    session: Mutex<Option<reqwest::Client>>,
}

impl SessionHost {
    #[must_use]
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
            session: Mutex::new(None),
        }
    }

    /// Returns the live session, provisioning it if none exists.
    ///
    /// Concurrent callers serialize on the host lock, so exactly one session is
    /// ever built per provisioning.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError::Http`] if the client cannot be constructed, e.g.
    /// when the configured user agent is not valid header text.
    pub async fn session(&self) -> Result<reqwest::Client, AcquireError> {
        let mut guard = self.session.lock().await;
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        let client = self.build_client()?;
        tracing::debug!("page session provisioned");
        *guard = Some(client.clone());
        Ok(client)
    }

    pub async fn is_active(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Releases the session. Safe to call repeatedly.
    pub async fn shutdown(&self) {
        if self.session.lock().await.take().is_some() {
            tracing::info!("page session released");
        }
    }

    fn build_client(&self) -> Result<reqwest::Client, AcquireError> {
        use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        // An invalid configured value falls back to reqwest's default.
        if let Ok(value) = HeaderValue::from_str(&self.accept_language) {
            headers.insert(ACCEPT_LANGUAGE, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .connect_timeout(std::time::Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn session_is_lazy_and_released_on_shutdown() {
        let host = SessionHost::new(&ScraperConfig::default());
        assert!(!host.is_active().await);

        host.session().await.unwrap();
        host.session().await.unwrap();
        assert!(host.is_active().await);

        host.shutdown().await;
        assert!(!host.is_active().await);
        host.shutdown().await;
    }
}
