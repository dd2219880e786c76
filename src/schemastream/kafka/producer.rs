//! Schema-bound producer pipeline
//!
//! An [`EventProducer`] binds one (topic, subject) pair for its lifetime.
//! The writer schema is resolved or registered exactly once at connect time;
//! every send encodes through that bound schema and enqueues without
//! blocking, returning a [`DeliveryHandle`] that resolves to the message's
//! [`DeliveryOutcome`] when the broker acknowledges or reports an error.

use crate::schemastream::kafka::kafka_error::ProducerError;
use crate::schemastream::kafka::message::DeliveryOutcome;
use crate::schemastream::kafka::producer_config::ProducerConfig;
use crate::schemastream::registry::SchemaResolver;
use crate::schemastream::serialization::EnvelopeEncoder;
use rdkafka::error::KafkaError;
use rdkafka::producer::{DeliveryFuture, FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Pending acknowledgment for one sent message
///
/// Awaiting the handle never panics and never loses the answer: transport
/// failures come back inside the outcome rather than being dropped.
pub struct DeliveryHandle {
    topic: String,
    inner: DeliveryFuture,
}

impl DeliveryHandle {
    /// Waits for the broker to acknowledge the message or report an error
    pub async fn outcome(self) -> DeliveryOutcome {
        match self.inner.await {
            Ok(Ok((partition, offset))) => {
                log::debug!(
                    "Message delivered to {} partition {} offset {}",
                    self.topic,
                    partition,
                    offset
                );
                DeliveryOutcome::delivered(self.topic, partition, offset)
            }
            Ok(Err((err, _message))) => {
                log::warn!("Delivery to {} failed: {}", self.topic, err);
                DeliveryOutcome::failed(self.topic, err.into())
            }
            // The producer was dropped before the ack arrived.
            Err(_canceled) => {
                DeliveryOutcome::failed(self.topic, KafkaError::Canceled.into())
            }
        }
    }
}

/// Producer pipeline for typed events under one registered schema
pub struct EventProducer<T> {
    producer: FutureProducer,
    topic: String,
    encoder: EnvelopeEncoder,
    shutdown: CancellationToken,
    _marker: PhantomData<fn(T)>,
}

impl<T> std::fmt::Debug for EventProducer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventProducer")
            .field("topic", &self.topic)
            .finish_non_exhaustive()
    }
}

impl<T: Serialize> EventProducer<T> {
    /// Connects the pipeline: validates configuration, resolves or registers
    /// the writer schema, and creates the transport client.
    ///
    /// Fails fast on incomplete configuration before any network call. When
    /// `auto_register` is off and the registry does not know the schema,
    /// this fails with the registry's not-registered error.
    pub async fn connect(
        config: ProducerConfig,
        resolver: Arc<dyn SchemaResolver>,
    ) -> Result<Self, ProducerError> {
        config.validate()?;

        let schema_id = resolver
            .register_or_resolve(&config.subject, &config.schema_definition, config.auto_register)
            .await?;
        let descriptor = resolver.resolve(schema_id).await?;
        let encoder = EnvelopeEncoder::new(descriptor);

        let producer: FutureProducer = config.client_config().create()?;
        log::info!(
            "Producer connected to {} for topic '{}' (subject '{}', schema id {})",
            config.common.brokers,
            config.topic,
            config.subject,
            schema_id
        );

        Ok(Self {
            producer,
            topic: config.topic,
            encoder,
            shutdown: CancellationToken::new(),
            _marker: PhantomData,
        })
    }

    /// Encodes `event` under the bound schema and enqueues it for delivery.
    ///
    /// Returns immediately; the broker's answer arrives through the handle.
    /// An encoding failure aborts only this call and leaves the pipeline
    /// ready for the next send.
    pub fn send(&self, key: Option<&str>, event: &T) -> Result<DeliveryHandle, ProducerError> {
        self.dispatch(None, key, event)
    }

    /// Sends to an explicit partition instead of letting the broker assign one
    pub fn send_to_partition(
        &self,
        partition: i32,
        key: Option<&str>,
        event: &T,
    ) -> Result<DeliveryHandle, ProducerError> {
        self.dispatch(Some(partition), key, event)
    }

    fn dispatch(
        &self,
        partition: Option<i32>,
        key: Option<&str>,
        event: &T,
    ) -> Result<DeliveryHandle, ProducerError> {
        let payload = self.encoder.encode(event)?;

        let mut record = FutureRecord::<str, [u8]>::to(&self.topic).payload(payload.as_slice());
        if let Some(k) = key {
            record = record.key(k);
        }
        if let Some(p) = partition {
            record = record.partition(p);
        }

        match self.producer.send_result(record) {
            Ok(future) => Ok(DeliveryHandle {
                topic: self.topic.clone(),
                inner: future,
            }),
            Err((err, _record)) => {
                log::error!("Failed to enqueue message for '{}': {}", self.topic, err);
                Err(err.into())
            }
        }
    }

    /// The schema id stamped into every envelope this pipeline produces
    pub fn schema_id(&self) -> u32 {
        self.encoder.schema_id()
    }

    /// Number of messages enqueued but not yet acknowledged
    pub fn in_flight(&self) -> i32 {
        self.producer.in_flight_count()
    }

    /// Token observed by `close`; cancel it to abandon a blocked flush
    pub fn cancellation_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Flushes all in-flight sends and releases the transport connection.
    ///
    /// Blocks up to `timeout` for every outstanding delivery to resolve.
    /// Takes `self`: the connection is released exactly once, on every exit
    /// path.
    pub async fn close(self, timeout: Duration) -> Result<(), ProducerError> {
        let pending = self.in_flight();
        if pending > 0 {
            log::info!(
                "Closing producer for '{}', flushing {} in-flight messages",
                self.topic,
                pending
            );
        }

        let producer = self.producer.clone();
        let flush = tokio::task::spawn_blocking(move || producer.flush(Timeout::After(timeout)));

        tokio::select! {
            joined = flush => match joined {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e.into()),
                Err(_panicked) => Err(ProducerError::Canceled),
            },
            _ = self.shutdown.cancelled() => {
                log::warn!("Producer close for '{}' canceled before flush completed", self.topic);
                Err(ProducerError::Canceled)
            }
        }
    }
}
