//! Error types for envelope encoding and decoding

/// Serialization error type for the schema-governed wire format
#[derive(Debug)]
pub enum SerializationError {
    /// The envelope header is missing, truncated, or carries an
    /// unrecognized format marker
    MalformedEnvelope(String),
    /// The payload bytes cannot be interpreted per the schema named
    /// by the envelope's schema id
    SchemaMismatch(String),
    /// The value could not be encoded per the bound schema
    EncodingFailed(String),
}

impl std::fmt::Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializationError::MalformedEnvelope(msg) => {
                write!(f, "Malformed envelope: {}", msg)
            }
            SerializationError::SchemaMismatch(msg) => {
                write!(f, "Schema mismatch: {}", msg)
            }
            SerializationError::EncodingFailed(msg) => {
                write!(f, "Encoding failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for SerializationError {}
