//! Schema-resolving consumer pipeline
//!
//! An [`EventConsumer`] joins a consumer group, subscribes to one topic, and
//! decodes each delivered envelope against the writer schema named in its
//! header. Decode failures are per-message: they are returned to the caller
//! and the pipeline stays consistent, so one poison pill never halts the
//! stream.

use crate::schemastream::kafka::consumer_config::ConsumerConfig;
use crate::schemastream::kafka::kafka_error::ConsumerError;
use crate::schemastream::kafka::message::Message;
use crate::schemastream::registry::SchemaResolver;
use crate::schemastream::serialization::{EnvelopeDecoder, SerializationError};
use futures::StreamExt;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::{BorrowedMessage, Message as KafkaMessage};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Consumer pipeline yielding typed events one at a time
pub struct EventConsumer<T> {
    consumer: StreamConsumer,
    decoder: EnvelopeDecoder,
    topic: String,
    group_id: String,
    shutdown: CancellationToken,
    _marker: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for EventConsumer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventConsumer")
            .field("topic", &self.topic)
            .field("group_id", &self.group_id)
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned> EventConsumer<T> {
    /// Connects the pipeline: validates configuration, joins the consumer
    /// group, and subscribes to the configured topic.
    ///
    /// Fails fast on incomplete configuration before any network call.
    pub fn connect(
        config: ConsumerConfig,
        resolver: Arc<dyn SchemaResolver>,
    ) -> Result<Self, ConsumerError> {
        config.validate()?;

        let consumer: StreamConsumer = config.client_config().create()?;
        consumer.subscribe(&[config.topic.as_str()])?;
        log::info!(
            "Consumer joined group '{}' on topic '{}' via {}",
            config.group_id,
            config.topic,
            config.common.brokers
        );

        Ok(Self {
            consumer,
            decoder: EnvelopeDecoder::new(resolver),
            topic: config.topic,
            group_id: config.group_id,
            shutdown: CancellationToken::new(),
            _marker: PhantomData,
        })
    }

    /// Waits up to `timeout` for the next message and decodes it.
    ///
    /// - `Ok(Some(message))`: one decoded event with its stream metadata.
    /// - `Ok(None)`: the timeout elapsed with no traffic. Normal, not an
    ///   error; poll again.
    /// - `Err(e)` where `e.is_per_message()`: a poison pill. The message is
    ///   skipped; the next poll continues with the following message.
    /// - `Err(Canceled)`: the cancellation token fired. The call unwinds
    ///   promptly instead of waiting out the timeout.
    /// - Other errors are transport-level and recoverable; the pipeline
    ///   remains ready for the next poll.
    pub async fn poll(&self, timeout: Duration) -> Result<Option<Message<T>>, ConsumerError> {
        let mut stream = self.consumer.stream();

        tokio::select! {
            _ = self.shutdown.cancelled() => {
                log::info!("Poll on '{}' canceled", self.topic);
                Err(ConsumerError::Canceled)
            }
            polled = tokio::time::timeout(timeout, stream.next()) => match polled {
                Err(_elapsed) => Ok(None),
                Ok(None) => Ok(None),
                Ok(Some(Err(e))) => Err(e.into()),
                Ok(Some(Ok(message))) => self.decode_message(&message).await.map(Some),
            }
        }
    }

    /// Lazy-sequence view over the subscription.
    ///
    /// Each item is one decode attempt; per-message failures appear as `Err`
    /// elements and the stream keeps going. The stream does not observe the
    /// cancellation token; use [`poll`](Self::poll) for cancellable waits.
    pub fn stream(
        &self,
    ) -> impl futures::Stream<Item = Result<Message<T>, ConsumerError>> + '_ {
        self.consumer.stream().then(move |polled| async move {
            match polled {
                Ok(message) => self.decode_message(&message).await,
                Err(e) => Err(e.into()),
            }
        })
    }

    async fn decode_message(
        &self,
        message: &BorrowedMessage<'_>,
    ) -> Result<Message<T>, ConsumerError> {
        let payload = message.payload().ok_or_else(|| {
            ConsumerError::Serialization(SerializationError::MalformedEnvelope(
                "message has no payload".to_string(),
            ))
        })?;

        let (schema_id, value) = match self.decoder.decode::<T>(payload).await {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!(
                    "Failed to decode message: topic={} partition={} offset={} payload_size={} error={}",
                    message.topic(),
                    message.partition(),
                    message.offset(),
                    payload.len(),
                    e
                );
                return Err(e.into());
            }
        };

        let timestamp = match message.timestamp() {
            rdkafka::Timestamp::NotAvailable => None,
            rdkafka::Timestamp::CreateTime(t) | rdkafka::Timestamp::LogAppendTime(t) => Some(t),
        };

        Ok(Message::new(
            message.key().map(|k| k.to_vec()),
            value,
            message.topic().to_string(),
            message.partition(),
            message.offset(),
            timestamp,
            schema_id,
        ))
    }

    /// Synchronously commits the current consumer position.
    ///
    /// With auto commit off (the default), nothing beyond what the caller
    /// has explicitly committed counts as processed.
    pub fn commit(&self) -> Result<(), ConsumerError> {
        self.consumer
            .commit_consumer_state(CommitMode::Sync)
            .map_err(Into::into)
    }

    /// Signals any blocked `poll` to unwind
    pub fn cancel(&self) {
        self.shutdown.cancel();
    }

    /// Token observed by `poll`; clone it to wire external shutdown signals
    pub fn cancellation_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Leaves the consumer group and releases the transport connection.
    ///
    /// No further offsets are committed here; the last explicit `commit`
    /// marks the resume point for the group.
    pub fn close(self) {
        log::info!(
            "Consumer leaving group '{}' on topic '{}'",
            self.group_id,
            self.topic
        );
        self.consumer.unsubscribe();
    }
}
