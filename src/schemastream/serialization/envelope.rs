//! Binary envelope framing for schema-governed payloads
//!
//! Every message value on the wire is framed as:
//!
//! ```text
//! [1-byte format marker][4-byte big-endian schema id][payload bytes]
//! ```
//!
//! The marker distinguishes registry-framed payloads from raw bytes; the
//! schema id names the writer schema in the registry. Payload bytes carry a
//! single Avro datum (no embedded schema, no object container framing).

use crate::schemastream::serialization::error::SerializationError;

/// Format marker identifying a registry-framed envelope
pub const FORMAT_MARKER: u8 = 0x00;

/// Total header size: marker byte plus big-endian schema id
pub const HEADER_LEN: usize = 5;

/// Frames a serialized payload into an envelope carrying `schema_id`.
///
/// Deterministic: the same (schema id, payload) pair always produces
/// identical bytes.
pub fn frame(schema_id: u32, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
    buf.push(FORMAT_MARKER);
    buf.extend_from_slice(&schema_id.to_be_bytes());
    buf.extend_from_slice(payload);
    buf
}

/// Splits an envelope into its schema id and payload bytes.
///
/// Fails with `MalformedEnvelope` when the buffer is shorter than the
/// fixed header or starts with an unrecognized marker.
pub fn split(bytes: &[u8]) -> Result<(u32, &[u8]), SerializationError> {
    if bytes.len() < HEADER_LEN {
        return Err(SerializationError::MalformedEnvelope(format!(
            "expected at least {} header bytes, got {}",
            HEADER_LEN,
            bytes.len()
        )));
    }
    if bytes[0] != FORMAT_MARKER {
        return Err(SerializationError::MalformedEnvelope(format!(
            "unrecognized format marker 0x{:02x}",
            bytes[0]
        )));
    }
    let schema_id = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
    Ok((schema_id, &bytes[HEADER_LEN..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_and_split_round_trip() {
        let framed = frame(42, b"payload");
        assert_eq!(framed[0], FORMAT_MARKER);
        assert_eq!(framed.len(), HEADER_LEN + 7);

        let (id, payload) = split(&framed).unwrap();
        assert_eq!(id, 42);
        assert_eq!(payload, b"payload");
    }

    #[test]
    fn test_frame_is_deterministic() {
        assert_eq!(frame(7, &[1, 2, 3]), frame(7, &[1, 2, 3]));
    }

    #[test]
    fn test_schema_id_is_big_endian() {
        let framed = frame(0x01020304, &[]);
        assert_eq!(&framed[1..5], &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_empty_payload_allowed() {
        let framed = frame(9, &[]);
        let (id, payload) = split(&framed).unwrap();
        assert_eq!(id, 9);
        assert!(payload.is_empty());
    }

    #[test]
    fn test_split_rejects_short_buffer() {
        let err = split(&[FORMAT_MARKER, 0, 0]).unwrap_err();
        assert!(matches!(err, SerializationError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_split_rejects_unknown_marker() {
        let mut framed = frame(1, b"x");
        framed[0] = 0x7f;
        let err = split(&framed).unwrap_err();
        assert!(matches!(err, SerializationError::MalformedEnvelope(_)));
    }
}
