use crate::schemastream::config::{require, ConfigError};
use crate::schemastream::kafka::client_config_builder::ClientConfigBuilder;
use crate::schemastream::kafka::common_config::CommonKafkaConfig;
use rdkafka::config::ClientConfig;
use std::time::Duration;

/// Configuration for a producer pipeline with sensible defaults
///
/// One config binds one (topic, subject) pair; the schema definition is the
/// writer schema every event of this pipeline is encoded with.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// Common configuration shared with consumers
    pub common: CommonKafkaConfig,
    /// Topic all sends go to
    pub topic: String,
    /// Subject the value schema is registered under
    pub subject: String,
    /// Writer schema definition text
    pub schema_definition: String,
    /// Register the schema on startup when the registry does not know it
    pub auto_register: bool,
    /// Per-message delivery timeout inside the client queue
    pub message_timeout: Duration,
    /// Enable the idempotent producer
    pub enable_idempotence: bool,
    /// Ack mode
    pub acks: AckMode,
    /// Compression applied to message batches
    pub compression: CompressionType,
    /// Linger time before sending a batch
    pub linger: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckMode {
    /// Don't wait for acknowledgment
    None,
    /// Wait for leader acknowledgment only
    Leader,
    /// Wait for all in-sync replicas
    All,
}

impl AckMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AckMode::None => "0",
            AckMode::Leader => "1",
            AckMode::All => "all",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    None,
    Gzip,
    Snappy,
    Lz4,
    Zstd,
}

impl CompressionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionType::None => "none",
            CompressionType::Gzip => "gzip",
            CompressionType::Snappy => "snappy",
            CompressionType::Lz4 => "lz4",
            CompressionType::Zstd => "zstd",
        }
    }
}

impl ProducerConfig {
    /// Create a new config binding brokers, topic, and value schema
    pub fn new(
        brokers: impl Into<String>,
        topic: impl Into<String>,
        subject: impl Into<String>,
        schema_definition: impl Into<String>,
    ) -> Self {
        Self {
            common: CommonKafkaConfig::new(brokers),
            topic: topic.into(),
            subject: subject.into(),
            schema_definition: schema_definition.into(),
            auto_register: false,
            message_timeout: Duration::from_secs(30),
            enable_idempotence: true,
            acks: AckMode::All,
            compression: CompressionType::Lz4,
            linger: Duration::from_millis(5),
        }
    }

    /// Replace the common configuration
    pub fn common(mut self, common: CommonKafkaConfig) -> Self {
        self.common = common;
        self
    }

    /// Register the schema on first use when unknown to the registry
    pub fn auto_register(mut self, enable: bool) -> Self {
        self.auto_register = enable;
        self
    }

    /// Set the per-message delivery timeout
    pub fn message_timeout(mut self, timeout: Duration) -> Self {
        self.message_timeout = timeout;
        self
    }

    /// Set the ack mode
    pub fn acks(mut self, acks: AckMode) -> Self {
        self.acks = acks;
        self
    }

    /// Set batch compression
    pub fn compression(mut self, compression: CompressionType) -> Self {
        self.compression = compression;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.common.validate()?;
        require("topic", &self.topic)?;
        require("schema subject", &self.subject)?;
        require("schema definition", &self.schema_definition)?;
        Ok(())
    }

    /// Assembles the librdkafka configuration for this pipeline
    pub fn client_config(&self) -> ClientConfig {
        ClientConfigBuilder::new()
            .common(&self.common)
            .property(
                "message.timeout.ms",
                self.message_timeout.as_millis().to_string(),
            )
            .property("enable.idempotence", self.enable_idempotence.to_string())
            .property("acks", self.acks.as_str())
            .property("compression.type", self.compression.as_str())
            .property("linger.ms", self.linger.as_millis().to_string())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINITION: &str = r#"{"type": "record", "name": "Ping", "fields": []}"#;

    #[test]
    fn test_defaults() {
        let config = ProducerConfig::new("broker:9092", "loyalty", "loyalty-value", DEFINITION);
        assert!(!config.auto_register);
        assert!(config.enable_idempotence);
        assert_eq!(config.acks, AckMode::All);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_topic_fails_validation() {
        let config = ProducerConfig::new("broker:9092", "", "loyalty-value", DEFINITION);
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::MissingField("topic")
        ));
    }

    #[test]
    fn test_missing_schema_fails_validation() {
        let config = ProducerConfig::new("broker:9092", "loyalty", "loyalty-value", "");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_client_config_properties() {
        let config = ProducerConfig::new("broker:9092", "loyalty", "loyalty-value", DEFINITION)
            .acks(AckMode::Leader)
            .compression(CompressionType::None)
            .message_timeout(Duration::from_secs(5));
        let client = config.client_config();

        assert_eq!(client.get("acks"), Some("1"));
        assert_eq!(client.get("compression.type"), Some("none"));
        assert_eq!(client.get("message.timeout.ms"), Some("5000"));
    }
}
