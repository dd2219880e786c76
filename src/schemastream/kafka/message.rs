use crate::schemastream::kafka::kafka_error::ProducerError;
use std::borrow::Cow;

/// A decoded message received from the broker
///
/// Pairs the typed event value with its stream position metadata. Immutable
/// after construction; the consumer pipeline builds one per delivered
/// message.
#[derive(Debug)]
pub struct Message<T> {
    key: Option<Vec<u8>>,
    value: T,
    topic: String,
    partition: i32,
    offset: i64,
    timestamp: Option<i64>,
    schema_id: u32,
}

impl<T> Message<T> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        key: Option<Vec<u8>>,
        value: T,
        topic: String,
        partition: i32,
        offset: i64,
        timestamp: Option<i64>,
        schema_id: u32,
    ) -> Self {
        Self {
            key,
            value,
            topic,
            partition,
            offset,
            timestamp,
            schema_id,
        }
    }

    /// Raw message key, when one was set
    pub fn key(&self) -> Option<&[u8]> {
        self.key.as_deref()
    }

    /// Message key rendered as UTF-8 (lossy)
    pub fn key_utf8(&self) -> Option<Cow<'_, str>> {
        self.key.as_deref().map(String::from_utf8_lossy)
    }

    /// Decoded event value
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn partition(&self) -> i32 {
        self.partition
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Broker or producer timestamp in milliseconds, when available
    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    /// Id of the writer schema the value was decoded with
    pub fn schema_id(&self) -> u32 {
        self.schema_id
    }

    /// Consumes the message and returns the owned value
    pub fn into_value(self) -> T {
        self.value
    }

    /// Consumes the message and returns key and value
    pub fn into_parts(self) -> (Option<Vec<u8>>, T) {
        (self.key, self.value)
    }
}

/// Final fate of one published message
///
/// Produced by awaiting the handle returned from `send`. Either the broker
/// acknowledged the message at a concrete (partition, offset), or delivery
/// failed with the reported error; there is no silent third state.
#[derive(Debug)]
pub struct DeliveryOutcome {
    /// Topic the message was sent to
    pub topic: String,
    /// Partition assigned by the broker on success
    pub partition: Option<i32>,
    /// Offset assigned by the broker on success
    pub offset: Option<i64>,
    /// Failure reason, when delivery did not complete
    pub error: Option<ProducerError>,
}

impl DeliveryOutcome {
    pub(crate) fn delivered(topic: String, partition: i32, offset: i64) -> Self {
        Self {
            topic,
            partition: Some(partition),
            offset: Some(offset),
            error: None,
        }
    }

    pub(crate) fn failed(topic: String, error: ProducerError) -> Self {
        Self {
            topic,
            partition: None,
            offset: None,
            error: Some(error),
        }
    }

    /// True when the broker acknowledged the message
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemastream::kafka::kafka_error::KafkaClientError;

    #[test]
    fn test_message_accessors() {
        let message = Message::new(
            Some(b"key-1".to_vec()),
            "value".to_string(),
            "loyalty".to_string(),
            2,
            41,
            Some(1_700_000_000_000),
            7,
        );

        assert_eq!(message.key(), Some(b"key-1".as_slice()));
        assert_eq!(message.key_utf8().as_deref(), Some("key-1"));
        assert_eq!(message.value(), "value");
        assert_eq!(message.topic(), "loyalty");
        assert_eq!(message.partition(), 2);
        assert_eq!(message.offset(), 41);
        assert_eq!(message.schema_id(), 7);
    }

    #[test]
    fn test_message_into_parts() {
        let message = Message::new(
            None,
            42u32,
            "loyalty".to_string(),
            0,
            0,
            None,
            1,
        );
        let (key, value) = message.into_parts();
        assert!(key.is_none());
        assert_eq!(value, 42);
    }

    #[test]
    fn test_outcome_states() {
        let ok = DeliveryOutcome::delivered("loyalty".to_string(), 1, 10);
        assert!(ok.succeeded());
        assert_eq!(ok.partition, Some(1));

        let failed = DeliveryOutcome::failed("loyalty".to_string(), KafkaClientError::Timeout);
        assert!(!failed.succeeded());
        assert!(failed.offset.is_none());
    }
}
