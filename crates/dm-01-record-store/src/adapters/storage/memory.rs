use crate::domain::entities::{tables, Record};
use crate::domain::errors::StorageError;
use crate::ports::outbound::TableStore;
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory table store for unit tests.
///
/// Every append happens under the write lock, so readers always see whole
/// records.
#[derive(Default)]
pub struct InMemoryTableStore {
    tables: RwLock<HashMap<String, Vec<Record>>>,
}

impl InMemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `table` with `records`, replacing anything already there.
    pub fn with_table(self, table: &str, records: Vec<Record>) -> Self {
        self.tables.write().insert(table.to_string(), records);
        self
    }

    /// Names of the tables created so far.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl TableStore for InMemoryTableStore {
    fn load(&self, table: &str) -> Result<Vec<Record>, StorageError> {
        if !tables::is_valid_table_name(table) {
            return Err(StorageError::InvalidTableName {
                name: table.to_string(),
            });
        }
        Ok(self.tables.read().get(table).cloned().unwrap_or_default())
    }

    fn append(&self, table: &str, record: &Record) -> Result<(), StorageError> {
        if !tables::is_valid_table_name(table) {
            return Err(StorageError::InvalidTableName {
                name: table.to_string(),
            });
        }
        self.tables
            .write()
            .entry(table.to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }
}
