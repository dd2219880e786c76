use crate::schemastream::kafka::common_config::{BrokerSecurity, CommonKafkaConfig};
use rdkafka::config::ClientConfig;
use std::collections::HashMap;
use std::time::Duration;

/// Shared utility for assembling librdkafka client configurations
///
/// Producer and consumer configs both funnel through this builder so the
/// common concerns (bootstrap list, security, timeouts, escape-hatch
/// properties) are applied in exactly one place.
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::new(),
        }
    }

    /// Applies the shared fields of a pipeline configuration
    pub fn common(self, common: &CommonKafkaConfig) -> Self {
        self.bootstrap_servers(&common.brokers)
            .client_id(common.client_id.as_deref())
            .request_timeout(common.request_timeout)
            .security(&common.security)
            .custom_properties(&common.custom_config)
    }

    /// Set bootstrap servers (brokers)
    pub fn bootstrap_servers(mut self, brokers: &str) -> Self {
        self.config.set("bootstrap.servers", brokers);
        self
    }

    /// Set client ID if provided
    pub fn client_id(mut self, client_id: Option<&str>) -> Self {
        if let Some(id) = client_id {
            self.config.set("client.id", id);
        }
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config
            .set("request.timeout.ms", timeout.as_millis().to_string());
        self
    }

    /// Apply transport security settings
    pub fn security(mut self, security: &BrokerSecurity) -> Self {
        match security {
            BrokerSecurity::Plaintext => {}
            BrokerSecurity::SaslSsl {
                mechanism,
                username,
                password,
                ca_cert_path,
            } => {
                self.config
                    .set("security.protocol", "SASL_SSL")
                    .set("sasl.mechanism", mechanism.as_str())
                    .set("sasl.username", username)
                    .set("sasl.password", password);
                if let Some(path) = ca_cert_path {
                    self.config.set("ssl.ca.location", path);
                }
            }
        }
        self
    }

    /// Add custom configuration properties
    pub fn custom_properties(mut self, custom_config: &HashMap<String, String>) -> Self {
        for (key, value) in custom_config {
            self.config.set(key, value);
        }
        self
    }

    /// Add a single property
    pub fn property(mut self, key: &str, value: impl Into<String>) -> Self {
        self.config.set(key, value.into());
        self
    }

    /// Build the final ClientConfig
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
