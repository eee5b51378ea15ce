use autoscan_core::{AcquisitionResult, Alert, Locator, VehicleRecord};
use serde::Serialize;

/// A candidate record together with its reconciliation verdict.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub record: VehicleRecord,
    #[serde(rename = "isNew")]
    pub is_new: bool,
}

/// How one platform fared during acquisition. Content itself is not kept.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    pub platform_id: String,
    pub platform: String,
    pub url: Locator,
    pub chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&AcquisitionResult> for SourceStatus {
    fn from(result: &AcquisitionResult) -> Self {
        Self {
            platform_id: result.platform_id.clone(),
            platform: result.platform_name.clone(),
            url: result.locator.clone(),
            chars: result.content.chars().count(),
            error: result.error.clone(),
        }
    }
}

/// Result of a search or an import.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    /// Every candidate, in extraction (or import) order.
    #[serde(rename = "vehicles")]
    pub all_records: Vec<ClassifiedRecord>,
    /// The subset whose keys had not been seen before this run.
    #[serde(rename = "newVehicles")]
    pub new_records: Vec<VehicleRecord>,
    pub new_count: usize,
    pub total_count: usize,
    pub alert: Alert,
    /// `true` if a notification for `new_records` was delivered.
    pub notified: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceStatus>,
}

impl SearchOutcome {
    pub(crate) fn new(
        all_records: Vec<ClassifiedRecord>,
        alert: Alert,
        notified: bool,
        sources: Vec<SourceStatus>,
    ) -> Self {
        let new_records: Vec<VehicleRecord> = all_records
            .iter()
            .filter(|c| c.is_new)
            .map(|c| c.record.clone())
            .collect();
        Self {
            new_count: new_records.len(),
            total_count: all_records.len(),
            all_records,
            new_records,
            alert,
            notified,
            sources,
        }
    }
}

/// Result of a single-platform scrape. Records are not reconciled.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOutcome {
    pub source: SourceStatus,
    #[serde(rename = "vehicles")]
    pub all_records: Vec<VehicleRecord>,
}
