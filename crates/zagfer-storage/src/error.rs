use thiserror::Error;

/// Storage-specific error types for the ZAGFER tool-room tracker.
///
/// These errors represent failures in database operations, row
/// decoding, and configuration of the SQLite store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database connection or query execution failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration execution failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Entity not found in database
    #[error("Entity not found: {entity_type} with {field}={value}")]
    NotFound {
        entity_type: String,
        field: String,
        value: String,
    },

    /// Stored data could not be decoded (e.g. malformed tool_ids JSON)
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Data validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Specialized result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for zagfer_core::Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound {
                entity_type, value, ..
            } => zagfer_core::Error::NotFound {
                entity: entity_type,
                id: value,
            },
            StorageError::Validation(msg) => zagfer_core::Error::Validation(msg),
            other => zagfer_core::Error::Persistence(other.to_string()),
        }
    }
}
