use std::collections::BTreeMap;

use autoscan_core::{Filter, Locator};

use crate::error::ScraperError;
use crate::platforms::{PlatformDescriptor, CATALOG};

/// Lookup over the marketplaces a pipeline may acquire from.
#[derive(Debug, Clone)]
pub struct PlatformRegistry {
    platforms: Vec<PlatformDescriptor>,
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PlatformRegistry {
    /// Registry over the built-in marketplace catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(CATALOG.to_vec())
    }

    /// Registry over an explicit set of descriptors. Later duplicates of an
    /// id are ignored.
    #[must_use]
    pub fn new(platforms: Vec<PlatformDescriptor>) -> Self {
        let mut unique: Vec<PlatformDescriptor> = Vec::with_capacity(platforms.len());
        for platform in platforms {
            if unique.iter().all(|p| p.id != platform.id) {
                unique.push(platform);
            }
        }
        Self { platforms: unique }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PlatformDescriptor> {
        let id = id.trim();
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Platform ids in catalog order.
    #[must_use]
    pub fn ids(&self) -> Vec<&'static str> {
        self.platforms.iter().map(|p| p.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlatformDescriptor> {
        self.platforms.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Locator for one platform.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::UnknownPlatform`] if `id` is not in the registry.
    pub fn locator_for(&self, id: &str, filter: &Filter) -> Result<Locator, ScraperError> {
        self.get(id)
            .map(|platform| platform.locator_for(filter))
            .ok_or_else(|| ScraperError::UnknownPlatform { id: id.to_string() })
    }

    /// Locators for every registered platform, keyed by platform id.
    #[must_use]
    pub fn build_locators(&self, filter: &Filter) -> BTreeMap<String, Locator> {
        self.platforms
            .iter()
            .map(|p| (p.id.to_string(), p.locator_for(filter)))
            .collect()
    }
}
