//! Error types for schema addressing

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema addressing errors
///
/// Every variant is a local, recoverable failure. The access-key evaluator
/// never produces one: unmatched data paths degrade to an absent or empty
/// result instead.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid pointer {pointer:?}: {reason}")]
    InvalidPointer { pointer: String, reason: String },

    #[error("Malformed schema at {at}: {reason}")]
    SchemaMalformed { at: String, reason: String },

    #[error("Property not found: {property} (at {at})")]
    PropertyNotFound { property: String, at: String },

    #[error("Index {index} out of range for tuple of {len} item schemas (at {at})")]
    IndexOutOfRange { index: usize, len: usize, at: String },

    #[error("Not a container at segment {segment:?}: schema type is {schema_type}")]
    NotAContainer { segment: String, schema_type: String },

    #[error("Non-local reference not supported: {0}")]
    NonLocalReference(String),

    #[error("Unresolved reference {reference}: segment {segment:?} not found")]
    UnresolvedReference { reference: String, segment: String },

    #[error("Circular reference detected: {0}")]
    CircularReference(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    pub(crate) fn invalid_pointer(pointer: &str, reason: impl Into<String>) -> Self {
        SchemaError::InvalidPointer {
            pointer: pointer.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(at: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::SchemaMalformed {
            at: at.into(),
            reason: reason.into(),
        }
    }
}
