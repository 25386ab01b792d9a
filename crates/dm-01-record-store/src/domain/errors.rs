//! # Domain Errors
//!
//! A missing table or a missing field is never an error here. Only the
//! backing medium can fail.

/// Errors raised by a `TableStore`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The medium could not be read or written (permission denied, disk full, ...).
    #[error("I/O error on table '{table}': {message}")]
    Io { table: String, message: String },

    /// A stored table could not be decoded, or a row could not be encoded.
    #[error("CSV error on table '{table}': {message}")]
    Csv { table: String, message: String },

    /// Table name rejected before touching the medium.
    #[error("invalid table name: {name:?}")]
    InvalidTableName { name: String },
}

impl StorageError {
    pub fn io(table: &str, err: impl std::fmt::Display) -> Self {
        StorageError::Io {
            table: table.to_string(),
            message: err.to_string(),
        }
    }

    pub fn csv(table: &str, err: impl std::fmt::Display) -> Self {
        StorageError::Csv {
            table: table.to_string(),
            message: err.to_string(),
        }
    }

    /// Name of the table involved.
    pub fn table(&self) -> &str {
        match self {
            StorageError::Io { table, .. } | StorageError::Csv { table, .. } => table,
            StorageError::InvalidTableName { name } => name,
        }
    }
}
