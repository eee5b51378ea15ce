//! Marketplace catalog. Each submodule owns one pure `Filter -> Locator`
//! builder; adding a marketplace means adding one descriptor to [`CATALOG`].

mod autoscout;
mod ebay;
mod kleinanzeigen;
mod mobile;
mod query;
mod uncle;

use autoscan_core::{Filter, Locator};

/// Static description of one marketplace.
#[derive(Debug, Clone, Copy)]
pub struct PlatformDescriptor {
    /// Stable identifier used in requests, e.g. `"mobile"`.
    pub id: &'static str,
    /// Display name, also written into extracted records, e.g. `"Mobile.de"`.
    pub name: &'static str,
    pub base_url: &'static str,
    build_locator: fn(&Filter) -> Locator,
}

impl PlatformDescriptor {
    #[must_use]
    pub const fn new(
        id: &'static str,
        name: &'static str,
        base_url: &'static str,
        build_locator: fn(&Filter) -> Locator,
    ) -> Self {
        Self {
            id,
            name,
            base_url,
            build_locator,
        }
    }

    /// Builds the search locator for `filter`. Total: every filter yields a
    /// locator, with unconstrained fields left out.
    #[must_use]
    pub fn locator_for(&self, filter: &Filter) -> Locator {
        (self.build_locator)(filter)
    }
}

/// Built-in marketplaces in catalog order.
pub const CATALOG: [PlatformDescriptor; 5] = [
    PlatformDescriptor::new(
        "mobile",
        "Mobile.de",
        "https://www.mobile.de",
        mobile::build_locator,
    ),
    PlatformDescriptor::new(
        "autoscout",
        "AutoScout24",
        "https://www.autoscout24.de",
        autoscout::build_locator,
    ),
    PlatformDescriptor::new(
        "ebay",
        "eBay Motors",
        "https://www.ebay.de",
        ebay::build_locator,
    ),
    PlatformDescriptor::new(
        "kleinanzeigen",
        "Kleinanzeigen",
        "https://www.kleinanzeigen.de",
        kleinanzeigen::build_locator,
    ),
    PlatformDescriptor::new(
        "uncle",
        "Uncle Auto",
        "https://www.uncle-auto.de",
        uncle::build_locator,
    ),
];
