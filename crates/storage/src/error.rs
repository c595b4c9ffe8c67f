use common::DecodeError;
use thiserror::Error;

/// Errors that can occur when interacting with the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored value could not be decoded into a domain type.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A value does not fit the column or field it is moved into.
    #[error("Value out of range for {column}: {value}")]
    OutOfRange { column: &'static str, value: String },

    /// The context refers to a transaction that was already committed or rolled back.
    #[error("Transaction already finished")]
    TransactionFinished,

    /// `run_in_tx` was called with a context that already carries a transaction.
    #[error("Nested transactions are not supported")]
    NestedTransaction,

    /// The backing store refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

pub(crate) fn to_db_id(column: &'static str, id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| StorageError::OutOfRange {
        column,
        value: id.to_string(),
    })
}

pub(crate) fn from_db_id(column: &'static str, id: i64) -> Result<u64> {
    u64::try_from(id).map_err(|_| StorageError::OutOfRange {
        column,
        value: id.to_string(),
    })
}
