//! Schema-governed wire format
//!
//! Serialization is split into three layers: raw envelope framing
//! ([`envelope`]), typed Avro datum encoding ([`avro`]), and the bound
//! encoder/decoder pair ([`codec`]) that the pipelines drive.

pub mod avro;
pub mod codec;
pub mod envelope;
pub mod error;

pub use codec::{DecodeError, EnvelopeDecoder, EnvelopeEncoder};
pub use envelope::{FORMAT_MARKER, HEADER_LEN};
pub use error::SerializationError;
