use thiserror::Error;

/// Error taxonomy shared by every ZAGFER component.
///
/// Validation and state violations are rejected before any mutation is
/// applied; persistence failures carry whatever the store reported.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is missing or an input is malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// An entity is not in the status the operation requires
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// An unknown id was referenced
    #[error("Not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// The acting user lacks permission for the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The entity store rejected or failed a write
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// The store cannot apply the coupled status/history mutation as one
    /// unit; the processor refuses to proceed rather than risk a split
    /// write.
    #[error("Store does not support atomic loan mutations")]
    AtomicityNotSupported,
}

impl Error {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Shorthand for an invalid-state rejection.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Error::InvalidState(message.into())
    }

    /// Shorthand for an unknown-id rejection.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("Tool", "42");
        assert_eq!(err.to_string(), "Not found: Tool with id 42");
    }

    #[test]
    fn test_validation_display() {
        let err = Error::validation("toolIds must not be empty");
        assert_eq!(err.to_string(), "Validation error: toolIds must not be empty");
    }
}
