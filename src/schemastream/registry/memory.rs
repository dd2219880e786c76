//! In-process schema registry backend
//!
//! Implements the same resolver contract as the HTTP client against local
//! state. Used by tests and offline development; ids are assigned
//! sequentially per instance and are stable for the instance's lifetime.

use crate::schemastream::registry::error::RegistryError;
use crate::schemastream::registry::types::SchemaDescriptor;
use crate::schemastream::registry::SchemaResolver;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MemoryRegistryState {
    next_id: u32,
    by_id: HashMap<u32, Arc<SchemaDescriptor>>,
    ids_by_subject: HashMap<(String, String), u32>,
    versions_by_subject: HashMap<String, u32>,
}

/// Registry backend holding all schemas in process memory
#[derive(Default)]
pub struct MemoryRegistry {
    state: Mutex<MemoryRegistryState>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `definition` under `subject`, returning the assigned id.
    ///
    /// Idempotent per (subject, definition): re-registering the same pair
    /// returns the original id without minting a new version.
    pub fn register(
        &self,
        subject: &str,
        definition: &str,
    ) -> Result<u32, RegistryError> {
        let mut state = self.state.lock().unwrap();
        let key = (subject.to_string(), definition.to_string());
        if let Some(id) = state.ids_by_subject.get(&key) {
            return Ok(*id);
        }

        let id = state.next_id + 1;
        let version = state.versions_by_subject.get(subject).copied().unwrap_or(0) + 1;
        let descriptor = SchemaDescriptor::parse(id, subject, Some(version), definition)?;

        state.next_id = id;
        state.by_id.insert(id, Arc::new(descriptor));
        state.ids_by_subject.insert(key, id);
        state.versions_by_subject.insert(subject.to_string(), version);
        Ok(id)
    }

    /// Number of registered schemas
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SchemaResolver for MemoryRegistry {
    async fn resolve(&self, id: u32) -> Result<Arc<SchemaDescriptor>, RegistryError> {
        self.state
            .lock()
            .unwrap()
            .by_id
            .get(&id)
            .cloned()
            .ok_or(RegistryError::SchemaNotFound(id))
    }

    async fn register_or_resolve(
        &self,
        subject: &str,
        definition: &str,
        auto_register: bool,
    ) -> Result<u32, RegistryError> {
        {
            let state = self.state.lock().unwrap();
            let key = (subject.to_string(), definition.to_string());
            if let Some(id) = state.ids_by_subject.get(&key) {
                return Ok(*id);
            }
        }
        if !auto_register {
            return Err(RegistryError::SchemaNotRegistered(subject.to_string()));
        }
        self.register(subject, definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINITION: &str = r#"{"type": "record", "name": "Ping", "fields": [{"name": "seq", "type": "long"}]}"#;
    const OTHER: &str = r#"{"type": "record", "name": "Pong", "fields": [{"name": "seq", "type": "long"}]}"#;

    #[tokio::test]
    async fn test_register_then_resolve() {
        let registry = MemoryRegistry::new();
        let id = registry.register("pings-value", DEFINITION).unwrap();

        let descriptor = registry.resolve(id).await.unwrap();
        assert_eq!(descriptor.subject, "pings-value");
        assert_eq!(descriptor.definition, DEFINITION);
    }

    #[tokio::test]
    async fn test_resolve_unknown_id() {
        let registry = MemoryRegistry::new();
        let err = registry.resolve(99).await.unwrap_err();
        assert!(matches!(err, RegistryError::SchemaNotFound(99)));
    }

    #[tokio::test]
    async fn test_auto_register_disabled_fails_without_mutation() {
        let registry = MemoryRegistry::new();
        let err = registry
            .register_or_resolve("pings-value", DEFINITION, false)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::SchemaNotRegistered(_)));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_auto_register_is_idempotent() {
        let registry = MemoryRegistry::new();
        let first = registry
            .register_or_resolve("pings-value", DEFINITION, true)
            .await
            .unwrap();
        let second = registry
            .register_or_resolve("pings-value", DEFINITION, true)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_new_definition_gets_new_version() {
        let registry = MemoryRegistry::new();
        let first = registry.register("pings-value", DEFINITION).unwrap();
        let second = registry.register("pings-value", OTHER).unwrap();
        assert_ne!(first, second);

        let descriptor = registry.resolve(second).await.unwrap();
        assert_eq!(descriptor.version, Some(2));
    }
}
