//! Registry authentication seam
//!
//! Credential acquisition and refresh belong to the identity provider, not
//! this crate. The [`TokenProvider`] trait is the boundary: the registry
//! client asks for a bearer token per request and the provider decides
//! whether that means returning a cached token or minting a fresh one.

use crate::schemastream::registry::error::RegistryError;
use async_trait::async_trait;
use std::sync::Arc;

/// Supplies bearer tokens for authenticated registry calls
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a token valid for at least the next request
    async fn bearer_token(&self) -> Result<String, RegistryError>;
}

/// Provider wrapping a token acquired once before startup
///
/// Suitable when the deployment environment injects a pre-acquired token;
/// expiry handling stays with whoever injected it.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn bearer_token(&self) -> Result<String, RegistryError> {
        Ok(self.token.clone())
    }
}

/// Authentication mode applied to every registry request
#[derive(Clone)]
pub enum RegistryAuth {
    /// Anonymous access (local development registries)
    None,
    /// HTTP basic credentials (API key style registries)
    Basic { username: String, password: String },
    /// Bearer tokens from an identity provider
    Bearer(Arc<dyn TokenProvider>),
}

impl std::fmt::Debug for RegistryAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryAuth::None => write!(f, "RegistryAuth::None"),
            RegistryAuth::Basic { username, .. } => {
                write!(f, "RegistryAuth::Basic {{ username: {:?} }}", username)
            }
            RegistryAuth::Bearer(_) => write!(f, "RegistryAuth::Bearer"),
        }
    }
}
