use std::sync::Arc;
use std::time::Duration;

use autoscan_core::{AcquisitionResult, Filter};

use crate::error::AcquireError;
use crate::page_source::PageSource;
use crate::platforms::PlatformDescriptor;

/// Acquires raw content for one platform.
///
/// Never fails: whatever goes wrong is recorded on the returned
/// [`AcquisitionResult`] as an empty body plus a reason.
pub struct AcquisitionWorker {
    source: Arc<dyn PageSource>,
    nav_timeout: Duration,
}

impl AcquisitionWorker {
    #[must_use]
    pub fn new(source: Arc<dyn PageSource>, nav_timeout: Duration) -> Self {
        Self {
            source,
            nav_timeout,
        }
    }

    pub async fn acquire(
        &self,
        platform: &PlatformDescriptor,
        filter: &Filter,
    ) -> AcquisitionResult {
        let locator = platform.locator_for(filter);
        tracing::info!(platform = platform.id, url = %locator, "acquiring platform");

        let fetched = tokio::time::timeout(self.nav_timeout, self.source.fetch_text(&locator))
            .await
            .unwrap_or_else(|_| {
                Err(AcquireError::Timeout {
                    millis: self.nav_timeout.as_millis(),
                })
            });

        match fetched {
            Ok(content) => {
                tracing::debug!(
                    platform = platform.id,
                    chars = content.chars().count(),
                    "platform acquired"
                );
                AcquisitionResult::success(platform.id, platform.name, locator, content)
            }
            Err(e) => {
                tracing::warn!(platform = platform.id, error = %e, "platform acquisition failed");
                AcquisitionResult::failure(platform.id, platform.name, locator, e.to_string())
            }
        }
    }
}
