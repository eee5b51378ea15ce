use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lenient;

/// Platform recorded in the dedup key when a record does not name one.
pub const MANUAL_PLATFORM: &str = "manual";

/// A used-vehicle listing, normalized from free text.
///
/// Display fields are kept as the marketplace (or the extraction backend)
/// rendered them, e.g. `"5.900 €"` or `"81 kW (110 PS)"`. Wire names match the
/// JSON shape the extraction prompt asks for and the import endpoint accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Marketplace listing id when one was visible in the listing.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub id: Option<String>,
    #[serde(
        rename = "titel",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub title: Option<String>,
    #[serde(
        rename = "preis",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub price: Option<String>,
    #[serde(
        rename = "km",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub mileage: Option<String>,
    /// First registration, usually a year or `MM/YYYY`.
    #[serde(
        rename = "jahr",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub first_registration: Option<String>,
    #[serde(
        rename = "leistung",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub power: Option<String>,
    #[serde(
        rename = "kraftstoff",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub fuel: Option<String>,
    #[serde(
        rename = "getriebe",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub transmission: Option<String>,
    #[serde(
        rename = "ort",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub location: Option<String>,
    #[serde(
        rename = "anbieter",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub seller: Option<String>,
    /// Inspection (TÜV) valid-until, e.g. `"06/2025"`.
    #[serde(
        rename = "tuev",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub inspection: Option<String>,
    #[serde(
        rename = "umweltplakette",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub emission_class: Option<String>,
    /// Display name of the source marketplace, e.g. `"Mobile.de"`.
    #[serde(
        rename = "plattform",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub platform: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub link: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub highlights: Option<String>,
    /// Set by the extraction step when the record was produced.
    #[serde(
        rename = "analyzedAt",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_datetime"
    )]
    pub extracted_at: Option<DateTime<Utc>>,
    /// Set by the import path when the record entered from outside.
    #[serde(
        rename = "importedAt",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_datetime"
    )]
    pub imported_at: Option<DateTime<Utc>>,
}

/// Identity of a listing across repeated sightings: `(platform, id-or-title)`.
///
/// The title fallback means a listing without a visible id whose title is
/// edited between runs is seen as a different listing. Same key with edited
/// price or mileage is *not* a new listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DedupKey {
    pub platform: String,
    pub listing: String,
}

impl std::fmt::Display for DedupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.platform, self.listing)
    }
}

impl VehicleRecord {
    /// Computes the dedup key used by reconciliation.
    ///
    /// A missing platform becomes [`MANUAL_PLATFORM`]; a missing id falls back
    /// to the title, and a record with neither keys on the empty string.
    #[must_use]
    pub fn dedup_key(&self) -> DedupKey {
        let platform = self
            .platform
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(MANUAL_PLATFORM)
            .to_string();

        let listing = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .or_else(|| {
                self.title
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
            })
            .unwrap_or_default()
            .to_string();

        DedupKey { platform, listing }
    }

    /// Title for display, with a placeholder for untitled records.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unbekannt")
    }
}
