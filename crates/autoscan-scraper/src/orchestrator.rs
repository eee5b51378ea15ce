use std::sync::Arc;

use autoscan_core::{AcquisitionResult, Filter};
use futures::stream::{self, StreamExt};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::page_source::PageSource;
use crate::platforms::PlatformDescriptor;
use crate::registry::PlatformRegistry;
use crate::worker::AcquisitionWorker;

/// Fans acquisition out over a set of platforms with bounded parallelism.
pub struct AcquisitionOrchestrator {
    registry: PlatformRegistry,
    worker: AcquisitionWorker,
    max_concurrent: usize,
}

impl AcquisitionOrchestrator {
    #[must_use]
    pub fn new(
        registry: PlatformRegistry,
        source: Arc<dyn PageSource>,
        config: &ScraperConfig,
    ) -> Self {
        Self {
            registry,
            worker: AcquisitionWorker::new(source, config.nav_timeout),
            max_concurrent: config.max_concurrent_platforms.max(1),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    /// Acquires a single platform by id.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::UnknownPlatform`] if `platform_id` is not
    /// registered. Fetch failures are reported inside the result instead.
    pub async fn acquire(
        &self,
        platform_id: &str,
        filter: &Filter,
    ) -> Result<AcquisitionResult, ScraperError> {
        let platform = self
            .registry
            .get(platform_id)
            .ok_or_else(|| ScraperError::UnknownPlatform {
                id: platform_id.to_string(),
            })?;
        Ok(self.worker.acquire(platform, filter).await)
    }

    /// Acquires every requested platform concurrently.
    ///
    /// Returns one result per distinct known id, in completion order. Unknown
    /// ids are skipped. A slow or failing platform only affects its own entry.
    pub async fn acquire_all<S: AsRef<str>>(
        &self,
        filter: &Filter,
        platform_ids: &[S],
    ) -> Vec<AcquisitionResult> {
        let platforms = self.resolve(platform_ids);
        if platforms.is_empty() {
            return Vec::new();
        }

        tracing::info!(
            platforms = platforms.len(),
            max_concurrent = self.max_concurrent,
            "starting acquisition"
        );

        let futures: Vec<_> = platforms
            .into_iter()
            .map(|platform| self.worker.acquire(platform, filter))
            .collect();
        let results: Vec<AcquisitionResult> = stream::iter(futures)
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        let failed = results.iter().filter(|r| r.is_failure()).count();
        if failed > 0 {
            tracing::warn!(
                failed,
                total = results.len(),
                "some platforms failed during acquisition"
            );
        }

        results
    }

    fn resolve<S: AsRef<str>>(&self, platform_ids: &[S]) -> Vec<&PlatformDescriptor> {
        let mut platforms: Vec<&PlatformDescriptor> = Vec::with_capacity(platform_ids.len());
        for id in platform_ids {
            let id = id.as_ref();
            match self.registry.get(id) {
                Some(platform) if platforms.iter().all(|p| p.id != platform.id) => {
                    platforms.push(platform);
                }
                Some(_) => tracing::debug!(platform = id, "duplicate platform id skipped"),
                None => tracing::debug!(platform = id, "unknown platform id skipped"),
            }
        }
        platforms
    }
}
