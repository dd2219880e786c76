use crate::schemastream::config::{require, ConfigError};
use std::collections::HashMap;
use std::time::Duration;

/// SASL mechanism used on authenticated broker connections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaslMechanism {
    Plain,
    ScramSha256,
    ScramSha512,
}

impl SaslMechanism {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaslMechanism::Plain => "PLAIN",
            SaslMechanism::ScramSha256 => "SCRAM-SHA-256",
            SaslMechanism::ScramSha512 => "SCRAM-SHA-512",
        }
    }
}

/// Transport security for broker connections
#[derive(Debug, Clone, Default)]
pub enum BrokerSecurity {
    /// Unauthenticated plaintext (local development only)
    #[default]
    Plaintext,
    /// SASL over TLS with externally supplied trust material
    SaslSsl {
        mechanism: SaslMechanism,
        username: String,
        password: String,
        /// Path to the CA certificate bundle; `None` uses the system store
        ca_cert_path: Option<String>,
    },
}

impl BrokerSecurity {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            BrokerSecurity::Plaintext => Ok(()),
            BrokerSecurity::SaslSsl {
                username, password, ..
            } => {
                require("sasl username", username)?;
                require("sasl password", password)?;
                Ok(())
            }
        }
    }
}

/// Configuration fields shared between producer and consumer pipelines
#[derive(Debug, Clone)]
pub struct CommonKafkaConfig {
    /// Kafka bootstrap list (e.g. "broker1:9093,broker2:9093")
    pub brokers: String,
    /// Client ID for this pipeline instance
    pub client_id: Option<String>,
    /// Transport security settings
    pub security: BrokerSecurity,
    /// Request timeout for broker operations
    pub request_timeout: Duration,
    /// Additional raw librdkafka properties (escape hatch)
    pub custom_config: HashMap<String, String>,
}

impl Default for CommonKafkaConfig {
    fn default() -> Self {
        Self {
            brokers: String::new(),
            client_id: None,
            security: BrokerSecurity::Plaintext,
            request_timeout: Duration::from_secs(30),
            custom_config: HashMap::new(),
        }
    }
}

impl CommonKafkaConfig {
    pub fn new(brokers: impl Into<String>) -> Self {
        Self {
            brokers: brokers.into(),
            ..Default::default()
        }
    }

    /// Set client ID
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set transport security
    pub fn security(mut self, security: BrokerSecurity) -> Self {
        self.security = security;
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Add a raw librdkafka property
    pub fn custom_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_config.insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require("brokers", &self.brokers)?;
        self.security.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_plaintext() {
        let config = CommonKafkaConfig::new("localhost:9092");
        assert!(matches!(config.security, BrokerSecurity::Plaintext));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_brokers_fails() {
        let config = CommonKafkaConfig::new("");
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::MissingField("brokers")
        ));
    }

    #[test]
    fn test_sasl_requires_credentials() {
        let config = CommonKafkaConfig::new("broker:9093").security(BrokerSecurity::SaslSsl {
            mechanism: SaslMechanism::Plain,
            username: "user".to_string(),
            password: String::new(),
            ca_cert_path: None,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mechanism_names() {
        assert_eq!(SaslMechanism::Plain.as_str(), "PLAIN");
        assert_eq!(SaslMechanism::ScramSha256.as_str(), "SCRAM-SHA-256");
        assert_eq!(SaslMechanism::ScramSha512.as_str(), "SCRAM-SHA-512");
    }

    #[test]
    fn test_builder_chain() {
        let config = CommonKafkaConfig::new("broker:9093")
            .client_id("loyalty-producer")
            .request_timeout(Duration::from_secs(10))
            .custom_property("socket.keepalive.enable", "true");

        assert_eq!(config.client_id.as_deref(), Some("loyalty-producer"));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.custom_config.len(), 1);
    }
}
