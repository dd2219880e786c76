use crate::schemastream::config::{require, ConfigError};
use crate::schemastream::kafka::client_config_builder::ClientConfigBuilder;
use crate::schemastream::kafka::common_config::CommonKafkaConfig;
use rdkafka::config::ClientConfig;
use std::time::Duration;

/// Configuration for a consumer pipeline with sensible defaults
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// Common configuration shared with producers
    pub common: CommonKafkaConfig,
    /// Consumer group to join
    pub group_id: String,
    /// Topic to subscribe to
    pub topic: String,
    /// Where to start when the group has no committed offset
    pub auto_offset_reset: OffsetReset,
    /// Enable auto commit; off by default so the caller controls what
    /// counts as processed
    pub enable_auto_commit: bool,
    /// Session timeout for group membership
    pub session_timeout: Duration,
    /// Heartbeat interval
    pub heartbeat_interval: Duration,
    /// Socket timeout for broker requests
    pub socket_timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetReset {
    /// Reset to earliest available offset
    Earliest,
    /// Reset to latest offset
    Latest,
    /// Fail when no initial offset exists
    None,
}

impl OffsetReset {
    pub fn as_str(&self) -> &'static str {
        match self {
            OffsetReset::Earliest => "earliest",
            OffsetReset::Latest => "latest",
            OffsetReset::None => "none",
        }
    }
}

impl ConsumerConfig {
    /// Create a new config with brokers, group ID, and topic
    pub fn new(
        brokers: impl Into<String>,
        group_id: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            common: CommonKafkaConfig::new(brokers),
            group_id: group_id.into(),
            topic: topic.into(),
            auto_offset_reset: OffsetReset::Earliest,
            enable_auto_commit: false,
            session_timeout: Duration::from_secs(30),
            heartbeat_interval: Duration::from_secs(3),
            socket_timeout: Duration::from_secs(60),
        }
    }

    /// Replace the common configuration
    pub fn common(mut self, common: CommonKafkaConfig) -> Self {
        self.common = common;
        self
    }

    /// Set the offset reset behavior
    pub fn auto_offset_reset(mut self, reset: OffsetReset) -> Self {
        self.auto_offset_reset = reset;
        self
    }

    /// Enable or disable auto commit
    pub fn auto_commit(mut self, enable: bool) -> Self {
        self.enable_auto_commit = enable;
        self
    }

    /// Set session and heartbeat timeouts
    pub fn session_config(
        mut self,
        session_timeout: Duration,
        heartbeat_interval: Duration,
    ) -> Self {
        self.session_timeout = session_timeout;
        self.heartbeat_interval = heartbeat_interval;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.common.validate()?;
        require("group id", &self.group_id)?;
        require("topic", &self.topic)?;
        Ok(())
    }

    /// Assembles the librdkafka configuration for this pipeline
    pub fn client_config(&self) -> ClientConfig {
        ClientConfigBuilder::new()
            .common(&self.common)
            .property("group.id", &self.group_id)
            .property("auto.offset.reset", self.auto_offset_reset.as_str())
            .property("enable.auto.commit", self.enable_auto_commit.to_string())
            .property(
                "session.timeout.ms",
                self.session_timeout.as_millis().to_string(),
            )
            .property(
                "heartbeat.interval.ms",
                self.heartbeat_interval.as_millis().to_string(),
            )
            .property(
                "socket.timeout.ms",
                self.socket_timeout.as_millis().to_string(),
            )
            .build()
    }
}
