//! Kafka transport pipelines
//!
//! The producer and consumer pipelines coordinate three things: the broker
//! transport (rdkafka), the wire codec, and the schema registry resolver.
//! Configuration is explicit and validated before any connection attempt.

pub mod client_config_builder;
pub mod common_config;
pub mod consumer;
pub mod consumer_config;
pub mod kafka_error;
pub mod message;
pub mod producer;
pub mod producer_config;

pub use client_config_builder::ClientConfigBuilder;
pub use common_config::{BrokerSecurity, CommonKafkaConfig, SaslMechanism};
pub use consumer::EventConsumer;
pub use consumer_config::{ConsumerConfig, OffsetReset};
pub use kafka_error::{ConsumerError, KafkaClientError, ProducerError};
pub use message::{DeliveryOutcome, Message};
pub use producer::{DeliveryHandle, EventProducer};
pub use producer_config::{AckMode, CompressionType, ProducerConfig};
