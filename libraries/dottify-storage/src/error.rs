/// Storage-specific errors
use dottify_core::DottifyError;
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// A UNIQUE constraint rejected the write
    #[error("{0}")]
    Conflict(String),

    /// A stored value could not be mapped back into a domain type
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Classify a failed INSERT/UPDATE, turning unique violations into a
    /// conflict carrying `conflict_message`
    pub fn from_write(err: sqlx::Error, conflict_message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict(conflict_message.to_string())
            }
            _ => Self::Database(err),
        }
    }

    /// A column held a value the domain does not accept
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptRow(msg.into())
    }
}

impl From<StorageError> for DottifyError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Conflict(msg) => DottifyError::conflict(msg),
            StorageError::Database(e) => DottifyError::Database(e.to_string()),
            other => DottifyError::storage(other.to_string()),
        }
    }
}
