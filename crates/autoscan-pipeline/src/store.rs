use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use autoscan_core::{DedupKey, VehicleRecord};

/// Process-wide memory of every listing seen so far, keyed by [`DedupKey`].
///
/// Entries live until [`Self::reset`]; nothing expires. The first sighting of
/// a key is stored and later sightings never overwrite it, so a listing whose
/// price changes is still "known".
#[derive(Debug, Default)]
pub struct ReconciliationStore {
    seen: Mutex<HashMap<DedupKey, VehicleRecord>>,
}

impl ReconciliationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `record` and reports whether its key was unseen.
    pub fn classify(&self, record: &VehicleRecord) -> bool {
        insert_if_absent(&mut self.lock(), record)
    }

    /// Classifies `records` in input order under a single lock, so a key that
    /// repeats within the batch is new only at its first position.
    pub fn classify_batch(&self, records: &[VehicleRecord]) -> Vec<bool> {
        let mut seen = self.lock();
        records
            .iter()
            .map(|record| insert_if_absent(&mut seen, record))
            .collect()
    }

    /// Forgets every key. Returns how many entries were dropped.
    pub fn reset(&self) -> usize {
        let mut seen = self.lock();
        let cleared = seen.len();
        seen.clear();
        cleared
    }

    #[must_use]
    pub fn contains(&self, key: &DedupKey) -> bool {
        self.lock().contains_key(key)
    }

    /// The record stored at the first sighting of `key`.
    #[must_use]
    pub fn get(&self, key: &DedupKey) -> Option<VehicleRecord> {
        self.lock().get(key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Every mutation is a single map operation, so a poisoned lock still
    // guards a consistent map.
    fn lock(&self) -> MutexGuard<'_, HashMap<DedupKey, VehicleRecord>> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn insert_if_absent(seen: &mut HashMap<DedupKey, VehicleRecord>, record: &VehicleRecord) -> bool {
    match seen.entry(record.dedup_key()) {
        Entry::Occupied(_) => false,
        Entry::Vacant(slot) => {
            slot.insert(record.clone());
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn golf() -> VehicleRecord {
        VehicleRecord {
            id: Some("12345".to_string()),
            title: Some("VW Golf 1.6 TDI".to_string()),
            price: Some("5.900 €".to_string()),
            platform: Some("Mobile.de".to_string()),
            ..VehicleRecord::default()
        }
    }

    #[test]
    fn second_sighting_is_known() {
        let store = ReconciliationStore::new();
        assert!(store.classify(&golf()));
        assert!(!store.classify(&golf()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn batch_keeps_first_occurrence() {
        let store = ReconciliationStore::new();
        assert_eq!(store.classify_batch(&[golf(), golf()]), vec![true, false]);
    }

    #[test]
    fn reset_forgets_everything() {
        let store = ReconciliationStore::new();
        store.classify(&golf());
        assert_eq!(store.reset(), 1);
        assert!(store.is_empty());
        assert!(store.classify(&golf()));
    }

    #[test]
    fn stored_value_is_the_first_sighting() {
        let store = ReconciliationStore::new();
        store.classify(&golf());
        let cheaper = VehicleRecord {
            price: Some("5.400 €".to_string()),
            ..golf()
        };
        assert!(!store.classify(&cheaper));

        let stored = store.get(&golf().dedup_key()).expect("stored record");
        assert_eq!(stored.price.as_deref(), Some("5.900 €"));
    }

    #[test]
    fn records_without_id_key_on_title() {
        let store = ReconciliationStore::new();
        let untitled_id = VehicleRecord {
            id: None,
            ..golf()
        };
        assert!(store.classify(&untitled_id));
        assert!(store.contains(&DedupKey {
            platform: "Mobile.de".to_string(),
            listing: "VW Golf 1.6 TDI".to_string(),
        }));
    }

    #[test]
    fn concurrent_classification_reports_new_once() {
        let store = ReconciliationStore::new();
        let new_count = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..16 {
                scope.spawn(|| {
                    if store.classify(&golf()) {
                        new_count.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(new_count.load(Ordering::SeqCst), 1);
        assert_eq!(store.len(), 1);
    }
}
