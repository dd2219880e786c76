//! Process configuration
//!
//! Configuration is carried in explicit structs validated once at startup,
//! before any component touches the network. Pipelines refuse to start on a
//! failed validation, so a missing setting can never surface as a mid-stream
//! failure.

use std::time::Duration;

/// Configuration validation error
///
/// Fatal by design: raised before any I/O, never during message flow.
#[derive(Debug)]
pub enum ConfigError {
    /// A required setting is absent or empty
    MissingField(&'static str),
    /// A setting is present but unusable
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingField(field) => {
                write!(f, "Missing required configuration value: {}", field)
            }
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Checks that a required string setting is present and non-empty
pub fn require(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Credential material for the schema registry, as loaded from the
/// environment. Converted into a runtime auth mode by the registry client.
#[derive(Debug, Clone, Default)]
pub enum RegistryCredential {
    /// Anonymous access
    #[default]
    None,
    /// HTTP basic credentials
    Basic { username: String, password: String },
    /// A bearer token pre-acquired from the identity provider
    BearerToken(String),
}

/// Location and credential of the schema registry service
#[derive(Debug, Clone)]
pub struct RegistryEndpoint {
    /// Base URL, e.g. `https://registry.example.com:8081`
    pub base_url: String,
    pub credential: RegistryCredential,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl RegistryEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credential: RegistryCredential::None,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Set the credential
    pub fn credential(mut self, credential: RegistryCredential) -> Self {
        self.credential = credential;
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require("registry base url", &self.base_url)?;
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                field: "registry base url",
                reason: format!("'{}' is not an http(s) url", self.base_url),
            });
        }
        match &self.credential {
            RegistryCredential::None => {}
            RegistryCredential::Basic { username, password } => {
                require("registry username", username)?;
                require("registry password", password)?;
            }
            RegistryCredential::BearerToken(token) => {
                require("registry bearer token", token)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_endpoint() {
        let endpoint = RegistryEndpoint::new("https://registry:8081").credential(
            RegistryCredential::Basic {
                username: "svc".to_string(),
                password: "pw".to_string(),
            },
        );
        assert!(endpoint.validate().is_ok());
    }

    #[test]
    fn test_missing_url_fails() {
        let err = RegistryEndpoint::new("  ").validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn test_non_http_url_fails() {
        let err = RegistryEndpoint::new("registry:8081").validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_empty_basic_credential_fails() {
        let endpoint = RegistryEndpoint::new("http://registry:8081").credential(
            RegistryCredential::Basic {
                username: "svc".to_string(),
                password: "".to_string(),
            },
        );
        assert!(endpoint.validate().is_err());
    }
}
