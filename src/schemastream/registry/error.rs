//! Schema registry error taxonomy

use thiserror::Error;

/// Errors surfaced by schema registry operations
///
/// All variants are recoverable from the pipeline's point of view: the
/// caller decides whether to retry, fall back, or abort. Unavailability is
/// kept distinct from a definitive not-found answer so retry policies can
/// tell a flaky network from a missing schema.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry endpoint could not be reached
    #[error("schema registry unavailable: {0}")]
    Unavailable(String),

    /// The registry has no schema under the requested id
    #[error("schema id {0} not found in registry")]
    SchemaNotFound(u32),

    /// No matching schema is registered under the subject and
    /// auto-registration is disabled
    #[error("no schema registered under subject '{0}' and auto-registration is disabled")]
    SchemaNotRegistered(String),

    /// The schema definition text could not be parsed
    #[error("invalid schema definition: {0}")]
    InvalidSchema(String),

    /// The registry answered with something this client does not understand
    #[error("unexpected registry response (status {status}): {body}")]
    Protocol { status: u16, body: String },

    /// Credential acquisition failed in the identity-provider seam
    #[error("registry authentication failed: {0}")]
    Auth(String),
}
