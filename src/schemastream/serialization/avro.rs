//! Typed Avro datum encoding for serde-modeled events
//!
//! Values are encoded as raw Avro datums (no object container file framing),
//! matching the envelope payload format. Typed structs are bridged through
//! `apache_avro`'s serde support: serialize to an Avro `Value`, resolve it
//! against the writer schema, then emit datum bytes.

use crate::schemastream::serialization::error::SerializationError;
use apache_avro::{from_avro_datum, to_avro_datum, Schema as AvroSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Cursor;

/// Serialize a typed value to Avro datum bytes per `schema`
pub fn encode_value<T: Serialize>(
    schema: &AvroSchema,
    value: &T,
) -> Result<Vec<u8>, SerializationError> {
    let avro_value = apache_avro::to_value(value)
        .map_err(|e| SerializationError::EncodingFailed(format!("value conversion: {}", e)))?;

    // Resolving maps serde's generic representation onto the writer schema
    // (int widths, union branch selection) before datum encoding.
    let resolved = avro_value
        .resolve(schema)
        .map_err(|e| SerializationError::EncodingFailed(format!("schema resolution: {}", e)))?;

    to_avro_datum(schema, resolved)
        .map_err(|e| SerializationError::EncodingFailed(format!("datum encoding: {}", e)))
}

/// Deserialize Avro datum bytes into a typed value per `schema`
pub fn decode_value<T: DeserializeOwned>(
    schema: &AvroSchema,
    bytes: &[u8],
) -> Result<T, SerializationError> {
    let mut cursor = Cursor::new(bytes);
    let avro_value = from_avro_datum(schema, &mut cursor, None)
        .map_err(|e| SerializationError::SchemaMismatch(format!("datum decoding: {}", e)))?;

    apache_avro::from_value::<T>(&avro_value)
        .map_err(|e| SerializationError::SchemaMismatch(format!("value conversion: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: i64,
        label: String,
    }

    const SAMPLE_SCHEMA: &str = r#"{
        "type": "record",
        "name": "Sample",
        "fields": [
            {"name": "id", "type": "long"},
            {"name": "label", "type": "string"}
        ]
    }"#;

    fn schema() -> AvroSchema {
        AvroSchema::parse_str(SAMPLE_SCHEMA).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let schema = schema();
        let original = Sample {
            id: 17,
            label: "seventeen".to_string(),
        };

        let bytes = encode_value(&schema, &original).unwrap();
        let decoded: Sample = decode_value(&schema, &bytes).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let schema = schema();
        let value = Sample {
            id: 1,
            label: "a".to_string(),
        };
        assert_eq!(
            encode_value(&schema, &value).unwrap(),
            encode_value(&schema, &value).unwrap()
        );
    }

    #[test]
    fn test_truncated_payload_is_schema_mismatch() {
        let schema = schema();
        let bytes = encode_value(
            &schema,
            &Sample {
                id: 5,
                label: "hello".to_string(),
            },
        )
        .unwrap();

        let err = decode_value::<Sample>(&schema, &bytes[..bytes.len() - 3]).unwrap_err();
        assert!(matches!(err, SerializationError::SchemaMismatch(_)));
    }

    #[test]
    fn test_mismatched_shape_fails_encode() {
        #[derive(Serialize)]
        struct Other {
            something_else: bool,
        }

        let err = encode_value(
            &schema(),
            &Other {
                something_else: true,
            },
        )
        .unwrap_err();
        assert!(matches!(err, SerializationError::EncodingFailed(_)));
    }
}
