//! Envelope encoder and decoder
//!
//! The encoder is bound to a single resolved schema for its lifetime, so the
//! producer pipeline pays the registry round trip once. The decoder carries a
//! resolver capability instead: the writer schema is named by each envelope,
//! so it is looked up (and cached) per schema id on first encounter.

use crate::schemastream::registry::{RegistryError, SchemaDescriptor, SchemaResolver};
use crate::schemastream::serialization::error::SerializationError;
use crate::schemastream::serialization::{avro, envelope};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Error raised while decoding an envelope
#[derive(Debug)]
pub enum DecodeError {
    /// The envelope or its payload is bad; per-message, the stream continues
    Serialization(SerializationError),
    /// The embedded schema id could not be resolved
    Registry(RegistryError),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Serialization(e) => write!(f, "Decode error: {}", e),
            DecodeError::Registry(e) => write!(f, "Decode error: {}", e),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Serialization(e) => Some(e),
            DecodeError::Registry(e) => Some(e),
        }
    }
}

impl From<SerializationError> for DecodeError {
    fn from(err: SerializationError) -> Self {
        DecodeError::Serialization(err)
    }
}

impl From<RegistryError> for DecodeError {
    fn from(err: RegistryError) -> Self {
        DecodeError::Registry(err)
    }
}

/// Encodes typed values into envelopes under one bound schema
#[derive(Clone)]
pub struct EnvelopeEncoder {
    descriptor: Arc<SchemaDescriptor>,
}

impl EnvelopeEncoder {
    pub fn new(descriptor: Arc<SchemaDescriptor>) -> Self {
        Self { descriptor }
    }

    /// The schema id stamped into every envelope this encoder produces
    pub fn schema_id(&self) -> u32 {
        self.descriptor.id
    }

    /// Serializes `value` per the bound schema and frames it into an envelope
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, SerializationError> {
        let payload = avro::encode_value(&self.descriptor.schema, value)?;
        Ok(envelope::frame(self.descriptor.id, &payload))
    }
}

/// Decodes envelopes into typed values, resolving writer schemas on demand
#[derive(Clone)]
pub struct EnvelopeDecoder {
    resolver: Arc<dyn SchemaResolver>,
}

impl EnvelopeDecoder {
    pub fn new(resolver: Arc<dyn SchemaResolver>) -> Self {
        Self { resolver }
    }

    /// Parses the envelope header, resolves the embedded schema id, and
    /// decodes the payload into a typed value.
    ///
    /// Returns the schema id alongside the value so callers can observe
    /// which writer schema produced each message.
    pub async fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<(u32, T), DecodeError> {
        let (schema_id, payload) = envelope::split(bytes)?;
        let descriptor = self.resolver.resolve(schema_id).await?;
        let value = avro::decode_value(&descriptor.schema, payload)?;
        Ok((schema_id, value))
    }
}
