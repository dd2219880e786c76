//! Process-lifetime schema cache
//!
//! Schema identity is immutable in the registry, so cached entries can never
//! go stale and the cache never evicts. Insertion is idempotent: concurrent
//! callers racing on the same id land on the same descriptor, and duplicate
//! remote fetches are wasteful but harmless.

use crate::schemastream::registry::types::SchemaDescriptor;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Shared id <-> schema mapping, populated lazily
#[derive(Debug, Default)]
pub struct SchemaCache {
    by_id: RwLock<HashMap<u32, Arc<SchemaDescriptor>>>,
    ids_by_subject: RwLock<HashMap<(String, String), u32>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a descriptor by schema id
    pub fn get(&self, id: u32) -> Option<Arc<SchemaDescriptor>> {
        self.by_id.read().unwrap().get(&id).cloned()
    }

    /// Inserts a descriptor, returning the canonical cached copy.
    ///
    /// First writer wins; a second insert under the same id returns the
    /// already-cached descriptor unchanged.
    pub fn insert(&self, descriptor: SchemaDescriptor) -> Arc<SchemaDescriptor> {
        let mut by_id = self.by_id.write().unwrap();
        let entry = by_id
            .entry(descriptor.id)
            .or_insert_with(|| Arc::new(descriptor));
        Arc::clone(entry)
    }

    /// Looks up the registered id for a (subject, definition) pair
    pub fn id_for(&self, subject: &str, definition: &str) -> Option<u32> {
        self.ids_by_subject
            .read()
            .unwrap()
            .get(&(subject.to_string(), definition.to_string()))
            .copied()
    }

    /// Records the id the registry assigned to a (subject, definition) pair
    pub fn remember_subject(&self, subject: &str, definition: &str, id: u32) {
        self.ids_by_subject
            .write()
            .unwrap()
            .entry((subject.to_string(), definition.to_string()))
            .or_insert(id);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.by_id.read().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINITION: &str = r#"{"type": "record", "name": "Ping", "fields": [{"name": "seq", "type": "long"}]}"#;

    fn descriptor(id: u32) -> SchemaDescriptor {
        SchemaDescriptor::parse(id, "pings-value", Some(1), DEFINITION).unwrap()
    }

    #[test]
    fn test_miss_then_hit() {
        let cache = SchemaCache::new();
        assert!(cache.get(1).is_none());

        cache.insert(descriptor(1));
        let hit = cache.get(1).unwrap();
        assert_eq!(hit.id, 1);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let cache = SchemaCache::new();
        let first = cache.insert(descriptor(1));
        let second = cache.insert(descriptor(1));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_subject_mapping() {
        let cache = SchemaCache::new();
        assert!(cache.id_for("pings-value", DEFINITION).is_none());

        cache.remember_subject("pings-value", DEFINITION, 7);
        assert_eq!(cache.id_for("pings-value", DEFINITION), Some(7));

        // first mapping sticks
        cache.remember_subject("pings-value", DEFINITION, 9);
        assert_eq!(cache.id_for("pings-value", DEFINITION), Some(7));
    }
}
