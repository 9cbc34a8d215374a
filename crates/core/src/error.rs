use crate::types::DbId;

/// Failure raised by the synthesizers.
///
/// Malformed sub-tokens are never errors; only missing preconditions and
/// (practically unreachable) serializer failures surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Failed to serialize artifact: {0}")]
    Serialization(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error("Internal error: {0}")]
    Internal(String),
}
