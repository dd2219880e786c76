//! Core schema registry types

use crate::schemastream::registry::error::RegistryError;
use apache_avro::Schema as AvroSchema;

/// A schema resolved from the registry
///
/// Carries both the definition text as registered and the parsed Avro schema
/// so decode paths never re-parse. Immutable once constructed: a given id
/// always names the same definition.
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    /// Registry-assigned schema id, globally unique within the registry
    pub id: u32,
    /// Subject (schema group) the schema was registered under
    pub subject: String,
    /// Version within the subject, when the registry reported one
    pub version: Option<u32>,
    /// Schema definition text as registered
    pub definition: String,
    /// Parsed form of `definition`
    pub schema: AvroSchema,
}

impl SchemaDescriptor {
    /// Parses `definition` and builds a descriptor.
    ///
    /// Fails with `InvalidSchema` when the definition text is not a valid
    /// Avro schema.
    pub fn parse(
        id: u32,
        subject: impl Into<String>,
        version: Option<u32>,
        definition: impl Into<String>,
    ) -> Result<Self, RegistryError> {
        let definition = definition.into();
        let schema = AvroSchema::parse_str(&definition)
            .map_err(|e| RegistryError::InvalidSchema(e.to_string()))?;
        Ok(Self {
            id,
            subject: subject.into(),
            version,
            definition,
            schema,
        })
    }
}

impl PartialEq for SchemaDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.subject == other.subject
            && self.version == other.version
            && self.definition == other.definition
    }
}

impl Eq for SchemaDescriptor {}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINITION: &str = r#"{"type": "record", "name": "Ping", "fields": [{"name": "seq", "type": "long"}]}"#;

    #[test]
    fn test_parse_valid_definition() {
        let descriptor = SchemaDescriptor::parse(3, "pings-value", Some(1), DEFINITION).unwrap();
        assert_eq!(descriptor.id, 3);
        assert_eq!(descriptor.subject, "pings-value");
        assert_eq!(descriptor.version, Some(1));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = SchemaDescriptor::parse(1, "s", None, "not a schema").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidSchema(_)));
    }

    #[test]
    fn test_descriptors_compare_by_identity_fields() {
        let a = SchemaDescriptor::parse(3, "s", Some(1), DEFINITION).unwrap();
        let b = SchemaDescriptor::parse(3, "s", Some(1), DEFINITION).unwrap();
        assert_eq!(a, b);
    }
}
