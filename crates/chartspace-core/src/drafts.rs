#![forbid(unsafe_code)]

//! Keyed draft store for in-progress editor state.
//!
//! Editors (note writers, order dialogs) keep unsaved drafts across tab
//! switches. Instead of an ambient module-level map, drafts live in an
//! explicit cache keyed by patient + encounter, owned by the hosting
//! screen, with a defined lifecycle: created on first access per key,
//! read and written through accessors, and evicted only through the
//! explicit teardown hooks. Nothing is dropped implicitly.

use std::fmt;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Composite key identifying one editing session's draft.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftKey {
    /// Patient identifier.
    pub patient: String,
    /// Encounter identifier.
    pub encounter: String,
}

impl DraftKey {
    /// Create a draft key.
    pub fn new(patient: impl Into<String>, encounter: impl Into<String>) -> Self {
        Self {
            patient: patient.into(),
            encounter: encounter.into(),
        }
    }
}

impl fmt::Display for DraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.patient, self.encounter)
    }
}

/// Explicit keyed draft cache.
#[derive(Debug, Clone, Default)]
pub struct DraftCache<V> {
    entries: AHashMap<DraftKey, V>,
}

impl<V> DraftCache<V> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: AHashMap::new(),
        }
    }

    /// Number of live drafts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no drafts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a draft.
    #[must_use]
    pub fn get(&self, key: &DraftKey) -> Option<&V> {
        self.entries.get(key)
    }

    /// Write access to a draft.
    pub fn get_mut(&mut self, key: &DraftKey) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Fetch the draft for `key`, creating it on first access.
    pub fn get_or_insert_with(&mut self, key: DraftKey, init: impl FnOnce() -> V) -> &mut V {
        self.entries.entry(key).or_insert_with(init)
    }

    /// Store a draft, returning any previous value for the key.
    pub fn put(&mut self, key: DraftKey, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Teardown hook for one editing session: remove and return its draft.
    pub fn evict(&mut self, key: &DraftKey) -> Option<V> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            tracing::debug!(message = "drafts.evict", key = %key);
        }
        removed
    }

    /// Teardown hook for a patient: drop every encounter's draft.
    ///
    /// Returns how many drafts were evicted.
    pub fn end_session(&mut self, patient: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.patient != patient);
        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::debug!(message = "drafts.end_session", patient, evicted);
        }
        evicted
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_created_on_first_access_and_reused_after() {
        let mut cache: DraftCache<String> = DraftCache::new();
        let key = DraftKey::new("p1", "e1");
        cache
            .get_or_insert_with(key.clone(), String::new)
            .push_str("HPI: ");
        cache
            .get_or_insert_with(key.clone(), String::new)
            .push_str("fever x3 days");
        assert_eq!(cache.get(&key).unwrap(), "HPI: fever x3 days");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn evict_returns_the_draft_once() {
        let mut cache = DraftCache::new();
        let key = DraftKey::new("p1", "e1");
        cache.put(key.clone(), 42);
        assert_eq!(cache.evict(&key), Some(42));
        assert_eq!(cache.evict(&key), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn end_session_evicts_all_encounters_for_one_patient() {
        let mut cache = DraftCache::new();
        cache.put(DraftKey::new("p1", "e1"), 1);
        cache.put(DraftKey::new("p1", "e2"), 2);
        cache.put(DraftKey::new("p2", "e1"), 3);
        assert_eq!(cache.end_session("p1"), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&DraftKey::new("p2", "e1")).is_some());
    }

    #[test]
    fn same_encounter_id_under_different_patients_is_distinct() {
        let mut cache = DraftCache::new();
        cache.put(DraftKey::new("p1", "e1"), "a");
        cache.put(DraftKey::new("p2", "e1"), "b");
        assert_eq!(cache.get(&DraftKey::new("p1", "e1")), Some(&"a"));
        assert_eq!(cache.get(&DraftKey::new("p2", "e1")), Some(&"b"));
    }
}
