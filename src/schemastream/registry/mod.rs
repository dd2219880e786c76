//! Schema registry access
//!
//! The [`SchemaResolver`] trait is the capability the wire codec and the
//! pipelines program against. Two backends implement it: the HTTP
//! [`RegistryClient`] for a remote registry and the in-process
//! [`MemoryRegistry`] for tests and offline development.

pub mod auth;
pub mod cache;
pub mod client;
pub mod error;
pub mod memory;
pub mod types;

use async_trait::async_trait;
use std::sync::Arc;

pub use auth::{RegistryAuth, StaticTokenProvider, TokenProvider};
pub use cache::SchemaCache;
pub use client::RegistryClient;
pub use error::RegistryError;
pub use memory::MemoryRegistry;
pub use types::SchemaDescriptor;

/// Capability to resolve and register schemas
#[async_trait]
pub trait SchemaResolver: Send + Sync {
    /// Resolves a schema id to its descriptor.
    ///
    /// Backends cache aggressively: a given id always names the same
    /// definition, so repeated calls must return equal descriptors and
    /// should avoid repeated remote fetches.
    async fn resolve(&self, id: u32) -> Result<Arc<SchemaDescriptor>, RegistryError>;

    /// Returns the id registered for `(subject, definition)`.
    ///
    /// When the pair is unknown, registers a new version if `auto_register`
    /// is set and fails with `SchemaNotRegistered` otherwise. Safe to call
    /// concurrently for the same pair; the registry is the arbiter of the
    /// canonical id.
    async fn register_or_resolve(
        &self,
        subject: &str,
        definition: &str,
        auto_register: bool,
    ) -> Result<u32, RegistryError>;
}
