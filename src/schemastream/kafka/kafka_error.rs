use crate::schemastream::config::ConfigError;
use crate::schemastream::registry::RegistryError;
use crate::schemastream::serialization::{DecodeError, SerializationError};
use rdkafka::error::KafkaError;

/// Unified error type for producer and consumer pipeline operations
///
/// Per-message failures (serialization, registry resolution, delivery) leave
/// the pipeline usable; only `Configuration` is fatal to startup.
#[derive(Debug)]
pub enum KafkaClientError {
    /// Underlying Kafka library error
    Kafka(KafkaError),
    /// Envelope encoding or decoding failed for one message
    Serialization(SerializationError),
    /// Schema registry operation failed
    Registry(RegistryError),
    /// Pipeline configuration is incomplete or invalid
    Configuration(ConfigError),
    /// Operation timed out
    Timeout,
    /// The cancellation signal fired while the operation was blocked
    Canceled,
}

impl std::fmt::Display for KafkaClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KafkaClientError::Kafka(e) => write!(f, "Kafka error: {}", e),
            KafkaClientError::Serialization(e) => write!(f, "Serialization error: {}", e),
            KafkaClientError::Registry(e) => write!(f, "Registry error: {}", e),
            KafkaClientError::Configuration(e) => write!(f, "Configuration error: {}", e),
            KafkaClientError::Timeout => write!(f, "Timeout waiting for operation"),
            KafkaClientError::Canceled => write!(f, "Operation canceled"),
        }
    }
}

impl std::error::Error for KafkaClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KafkaClientError::Kafka(e) => Some(e),
            KafkaClientError::Serialization(e) => Some(e),
            KafkaClientError::Registry(e) => Some(e),
            KafkaClientError::Configuration(e) => Some(e),
            KafkaClientError::Timeout | KafkaClientError::Canceled => None,
        }
    }
}

impl From<KafkaError> for KafkaClientError {
    fn from(err: KafkaError) -> Self {
        KafkaClientError::Kafka(err)
    }
}

impl From<SerializationError> for KafkaClientError {
    fn from(err: SerializationError) -> Self {
        KafkaClientError::Serialization(err)
    }
}

impl From<RegistryError> for KafkaClientError {
    fn from(err: RegistryError) -> Self {
        KafkaClientError::Registry(err)
    }
}

impl From<ConfigError> for KafkaClientError {
    fn from(err: ConfigError) -> Self {
        KafkaClientError::Configuration(err)
    }
}

impl From<DecodeError> for KafkaClientError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Serialization(e) => KafkaClientError::Serialization(e),
            DecodeError::Registry(e) => KafkaClientError::Registry(e),
        }
    }
}

/// Type alias for producer pipeline operations
pub type ProducerError = KafkaClientError;

/// Type alias for consumer pipeline operations
pub type ConsumerError = KafkaClientError;

impl KafkaClientError {
    /// True when the error concerns a single message rather than the
    /// pipeline itself; callers should report it and keep going.
    pub fn is_per_message(&self) -> bool {
        matches!(
            self,
            KafkaClientError::Serialization(_) | KafkaClientError::Registry(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            KafkaClientError::Timeout.to_string(),
            "Timeout waiting for operation"
        );
        assert_eq!(KafkaClientError::Canceled.to_string(), "Operation canceled");
    }

    #[test]
    fn test_decode_error_mapping() {
        let decode = DecodeError::Serialization(SerializationError::MalformedEnvelope(
            "short".to_string(),
        ));
        assert!(matches!(
            KafkaClientError::from(decode),
            KafkaClientError::Serialization(_)
        ));

        let decode = DecodeError::Registry(RegistryError::SchemaNotFound(4));
        assert!(matches!(
            KafkaClientError::from(decode),
            KafkaClientError::Registry(_)
        ));
    }

    #[test]
    fn test_per_message_classification() {
        assert!(KafkaClientError::Serialization(SerializationError::SchemaMismatch(
            "bad".to_string()
        ))
        .is_per_message());
        assert!(!KafkaClientError::Timeout.is_per_message());
        assert!(!KafkaClientError::Configuration(ConfigError::MissingField("topic")).is_per_message());
    }
}
