//! Response parsing for the structuring backend.
//!
//! Models wrap their answer in prose or code fences often enough that the
//! reply is scanned for the first syntactically valid JSON array instead of
//! being parsed whole.

use autoscan_core::VehicleRecord;
use chrono::Utc;
use serde_json::Value;

use crate::error::ExtractError;

/// Finds the first `[` from which a complete JSON array parses.
#[must_use]
pub fn locate_array(text: &str) -> Option<Vec<Value>> {
    text.match_indices('[').find_map(|(idx, _)| {
        serde_json::Deserializer::from_str(&text[idx..])
            .into_iter::<Vec<Value>>()
            .next()
            .and_then(Result::ok)
    })
}

/// Parses backend reply text into records stamped with the current time.
///
/// Array elements that are not objects are dropped. Field values of an
/// unexpected shape are lost individually, never the whole record.
///
/// # Errors
///
/// Returns [`ExtractError::NoJsonArray`] if the reply contains no JSON array.
pub fn parse_records(text: &str) -> Result<Vec<VehicleRecord>, ExtractError> {
    let items = locate_array(text).ok_or(ExtractError::NoJsonArray)?;
    let extracted_at = Utc::now();

    let total = items.len();
    let records: Vec<VehicleRecord> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| match serde_json::from_value::<VehicleRecord>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(error = %e, "dropping unreadable record");
                None
            }
        })
        .map(|record| VehicleRecord {
            extracted_at: Some(extracted_at),
            ..record
        })
        .collect();

    if records.len() < total {
        tracing::debug!(
            kept = records.len(),
            dropped = total - records.len(),
            "some array elements were not records"
        );
    }

    Ok(records)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
