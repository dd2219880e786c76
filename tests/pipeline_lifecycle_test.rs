//! Pipeline lifecycle tests that run without a broker
//!
//! Client creation in rdkafka is lazy, so pipelines can be constructed
//! against an unreachable endpoint. That is enough to exercise the
//! suspension and shutdown semantics: empty polls, prompt cancellation, and
//! per-message delivery failure reporting.

use schemastream::{
    ConfigError, ConsumerConfig, ConsumerError, EventConsumer, EventProducer, KafkaClientError,
    MemoryRegistry, ProducerConfig, SchemaResolver,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomerLoyalty {
    customer_id: i32,
    points_added: i32,
    description: String,
}

const LOYALTY_SCHEMA: &str = r#"{
    "type": "record",
    "name": "CustomerLoyalty",
    "fields": [
        {"name": "customerId", "type": "int"},
        {"name": "pointsAdded", "type": "int"},
        {"name": "description", "type": "string"}
    ]
}"#;

// nothing listens here
const DEAD_BROKER: &str = "127.0.0.1:19092";

fn resolver() -> Arc<dyn SchemaResolver> {
    Arc::new(MemoryRegistry::new())
}

fn consumer_config() -> ConsumerConfig {
    ConsumerConfig::new(DEAD_BROKER, "loyalty-readers", "loyalty")
}

#[tokio::test]
async fn test_connect_rejects_invalid_configuration_before_io() {
    let config = ProducerConfig::new("", "loyalty", "loyalty-value", LOYALTY_SCHEMA);
    let err = EventProducer::<CustomerLoyalty>::connect(config, resolver())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        KafkaClientError::Configuration(ConfigError::MissingField("brokers"))
    ));

    let config = ConsumerConfig::new(DEAD_BROKER, "", "loyalty");
    let err = EventConsumer::<CustomerLoyalty>::connect(config, resolver()).unwrap_err();
    assert!(matches!(err, KafkaClientError::Configuration(_)));
}

#[tokio::test]
async fn test_empty_poll_times_out_as_none() {
    let consumer = EventConsumer::<CustomerLoyalty>::connect(consumer_config(), resolver()).unwrap();

    let started = Instant::now();
    let polled = consumer.poll(Duration::from_millis(300)).await.unwrap();
    assert!(polled.is_none());
    assert!(started.elapsed() < Duration::from_secs(5));

    // the pipeline stays pollable after an empty poll
    let polled = consumer.poll(Duration::from_millis(100)).await.unwrap();
    assert!(polled.is_none());
    consumer.close();
}

#[tokio::test]
async fn test_cancel_unblocks_poll_within_grace_period() {
    let consumer = EventConsumer::<CustomerLoyalty>::connect(consumer_config(), resolver()).unwrap();

    let token = consumer.cancellation_token();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    });

    let started = Instant::now();
    let result = consumer.poll(Duration::from_secs(30)).await;
    let elapsed = started.elapsed();

    assert!(matches!(result, Err(ConsumerError::Canceled)));
    // unblocked by the token, not the 30s timeout
    assert!(elapsed < Duration::from_secs(5));
    consumer.close();
}

#[tokio::test]
async fn test_delivery_failure_is_reported_in_outcome() {
    let registry = Arc::new(MemoryRegistry::new());
    let config = ProducerConfig::new(DEAD_BROKER, "loyalty", "loyalty-value", LOYALTY_SCHEMA)
        .auto_register(true)
        .message_timeout(Duration::from_millis(500));

    let producer = EventProducer::<CustomerLoyalty>::connect(config, registry)
        .await
        .unwrap();

    let event = CustomerLoyalty {
        customer_id: 1,
        points_added: 0,
        description: "Points added: 0".to_string(),
    };
    let handle = producer.send(Some("customer-1"), &event).unwrap();

    // the queued message times out against the dead broker and the failure
    // comes back through the outcome, never silently dropped
    let outcome = tokio::time::timeout(Duration::from_secs(20), handle.outcome())
        .await
        .expect("outcome must resolve once the delivery timeout elapses");

    assert!(!outcome.succeeded());
    assert_eq!(outcome.topic, "loyalty");
    assert!(matches!(outcome.error, Some(KafkaClientError::Kafka(_))));

    producer.close(Duration::from_secs(10)).await.unwrap();
}

#[tokio::test]
async fn test_producer_binds_registered_schema_id() {
    let registry = Arc::new(MemoryRegistry::new());
    let expected = registry.register("loyalty-value", LOYALTY_SCHEMA).unwrap();

    let config = ProducerConfig::new(DEAD_BROKER, "loyalty", "loyalty-value", LOYALTY_SCHEMA);
    let producer = EventProducer::<CustomerLoyalty>::connect(config, registry)
        .await
        .unwrap();

    assert_eq!(producer.schema_id(), expected);
    producer.close(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn test_producer_connect_respects_auto_register_policy() {
    let config = ProducerConfig::new(DEAD_BROKER, "loyalty", "loyalty-value", LOYALTY_SCHEMA);
    let err = EventProducer::<CustomerLoyalty>::connect(config, resolver())
        .await
        .unwrap_err();
    assert!(matches!(err, KafkaClientError::Registry(_)));
}
