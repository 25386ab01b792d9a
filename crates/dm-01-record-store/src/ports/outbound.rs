//! # Outbound Ports (Driven Ports)
//!
//! The storage interface the SOAP handlers are handed. Injecting it instead
//! of touching the filesystem directly keeps handlers testable against
//! `InMemoryTableStore`.

use crate::domain::entities::Record;
use crate::domain::errors::StorageError;

/// Abstract interface over a set of named, append-only tables.
///
/// Production: `CsvTableStore`
/// Testing: `InMemoryTableStore`
///
/// ## Concurrency Contract
///
/// Implementations are shared across concurrent requests. Appends to one
/// table are serialized and whole-record: a `load` issued after `append`
/// returns sees the full record, and no `load` ever sees part of one.
/// Loads are not required to see appends that are still in flight.
pub trait TableStore: Send + Sync {
    /// Every record of `table` in stored order.
    ///
    /// Returns an empty vector when the table does not exist.
    fn load(&self, table: &str) -> Result<Vec<Record>, StorageError>;

    /// Append `record` to `table`, creating the table on first write.
    ///
    /// Field-name consistency across records is the caller's concern.
    /// Failures are returned as-is, never retried.
    fn append(&self, table: &str, record: &Record) -> Result<(), StorageError>;

    /// Number of records currently in `table`.
    fn count(&self, table: &str) -> Result<usize, StorageError> {
        self.load(table).map(|records| records.len())
    }
}
