//! # schemastream
//!
//! Schema-registry-aware Kafka producer and consumer pipelines. Typed events
//! are encoded against a centrally registered Avro schema and framed into a
//! binary envelope carrying the schema id; consumers resolve the embedded id
//! (cached for the process lifetime) to decode each message against the
//! schema it was written with.
//!
//! ## Wire format
//!
//! ```text
//! [1-byte format marker 0x00][4-byte big-endian schema id][Avro datum]
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use schemastream::{
//!     ConsumerConfig, EventConsumer, EventProducer, ProducerConfig, RegistryAuth,
//!     RegistryClient,
//! };
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[derive(Serialize, Deserialize, Debug)]
//! #[serde(rename_all = "camelCase")]
//! struct CustomerLoyalty {
//!     customer_id: i32,
//!     points_added: i32,
//!     description: String,
//! }
//!
//! const SCHEMA: &str = r#"{
//!     "type": "record",
//!     "name": "CustomerLoyalty",
//!     "fields": [
//!         {"name": "customerId", "type": "int"},
//!         {"name": "pointsAdded", "type": "int"},
//!         {"name": "description", "type": "string"}
//!     ]
//! }"#;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(RegistryClient::new(
//!         "http://localhost:8081",
//!         RegistryAuth::None,
//!     )?);
//!
//!     // Producer: schema resolved/registered once at connect time
//!     let config = ProducerConfig::new("localhost:9092", "loyalty", "loyalty-value", SCHEMA)
//!         .auto_register(true);
//!     let producer = EventProducer::<CustomerLoyalty>::connect(config, registry.clone()).await?;
//!
//!     let event = CustomerLoyalty {
//!         customer_id: 1,
//!         points_added: 10,
//!         description: "Points added: 10".to_string(),
//!     };
//!     let handle = producer.send(None, &event)?;
//!     let outcome = handle.outcome().await;
//!     println!("delivered: {}", outcome.succeeded());
//!     producer.close(Duration::from_secs(10)).await?;
//!
//!     // Consumer: writer schemas resolved per embedded id
//!     let config = ConsumerConfig::new("localhost:9092", "loyalty-readers", "loyalty");
//!     let consumer = EventConsumer::<CustomerLoyalty>::connect(config, registry)?;
//!     if let Some(message) = consumer.poll(Duration::from_secs(5)).await? {
//!         println!(
//!             "Customer {} received {} points",
//!             message.value().customer_id,
//!             message.value().points_added
//!         );
//!     }
//!     consumer.close();
//!     Ok(())
//! }
//! ```

pub mod schemastream;

// Re-export the main API at the crate root for easy access
pub use schemastream::config::{ConfigError, RegistryCredential, RegistryEndpoint};
pub use schemastream::kafka::{
    AckMode, BrokerSecurity, ClientConfigBuilder, CommonKafkaConfig, CompressionType,
    ConsumerConfig, ConsumerError, DeliveryHandle, DeliveryOutcome, EventConsumer, EventProducer,
    KafkaClientError, Message, OffsetReset, ProducerConfig, ProducerError, SaslMechanism,
};
pub use schemastream::registry::{
    MemoryRegistry, RegistryAuth, RegistryClient, RegistryError, SchemaCache, SchemaDescriptor,
    SchemaResolver, StaticTokenProvider, TokenProvider,
};
pub use schemastream::serialization::{
    DecodeError, EnvelopeDecoder, EnvelopeEncoder, SerializationError, FORMAT_MARKER, HEADER_LEN,
};
