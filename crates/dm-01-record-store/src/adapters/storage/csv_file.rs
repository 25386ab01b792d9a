use crate::domain::entities::{tables, Record};
use crate::domain::errors::StorageError;
use crate::ports::outbound::TableStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const UTF8_BOM: char = '\u{feff}';

/// CSV-file-backed table store.
///
/// Each table is `<data_dir>/<table>.csv` with a header row. The files are
/// meant to be edited by hand, so anything a spreadsheet tool writes is
/// accepted: short rows leave trailing fields absent and extra cells are
/// dropped.
///
/// Loads and appends on the same table run under one per-table mutex, and a
/// row is encoded in memory before it reaches the file in a single write.
pub struct CsvTableStore {
    data_dir: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CsvTableStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> io::Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let existing = tables::ALL
            .iter()
            .filter(|table| data_dir.join(format!("{table}.csv")).exists())
            .count();
        tracing::info!(
            data_dir = %data_dir.display(),
            existing_tables = existing,
            "[dm-01] Opened CSV table store"
        );

        Ok(Self {
            data_dir,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Path of the file backing `table`.
    pub fn table_path(&self, table: &str) -> Result<PathBuf, StorageError> {
        if !tables::is_valid_table_name(table) {
            return Err(StorageError::InvalidTableName {
                name: table.to_string(),
            });
        }
        Ok(self.data_dir.join(format!("{table}.csv")))
    }

    fn table_lock(&self, table: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        Arc::clone(locks.entry(table.to_string()).or_default())
    }

    fn read_records(table: &str, file: File) -> Result<Vec<Record>, StorageError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| StorageError::csv(table, e))?
            .iter()
            .enumerate()
            .map(|(i, name)| {
                if i == 0 {
                    name.trim_start_matches(UTF8_BOM).to_string()
                } else {
                    name.to_string()
                }
            })
            .collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| StorageError::csv(table, e))?;
            records.push(
                headers
                    .iter()
                    .zip(row.iter())
                    .map(|(name, value)| (name.as_str(), value))
                    .collect(),
            );
        }
        Ok(records)
    }

    fn ends_with_newline(file: &mut File) -> io::Result<bool> {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        Ok(last[0] == b'\n')
    }

    /// Encode the optional header and the row into one buffer.
    fn encode_row(table: &str, record: &Record, with_header: bool) -> Result<Vec<u8>, StorageError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        if with_header {
            writer
                .write_record(record.field_names())
                .map_err(|e| StorageError::csv(table, e))?;
        }
        writer
            .write_record(record.values())
            .map_err(|e| StorageError::csv(table, e))?;
        writer
            .into_inner()
            .map_err(|e| StorageError::csv(table, e))
    }
}

impl TableStore for CsvTableStore {
    fn load(&self, table: &str) -> Result<Vec<Record>, StorageError> {
        let path = self.table_path(table)?;
        let lock = self.table_lock(table);
        let _guard = lock.lock();

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(table, "[dm-01] Table not found, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::warn!(table, error = %e, "[dm-01] Failed to open table");
                return Err(StorageError::io(table, e));
            }
        };

        let records = Self::read_records(table, file)?;
        tracing::debug!(table, records = records.len(), "[dm-01] Loaded table");
        Ok(records)
    }

    fn append(&self, table: &str, record: &Record) -> Result<(), StorageError> {
        let path = self.table_path(table)?;
        if record.is_empty() {
            tracing::debug!(table, "[dm-01] Skipping append of empty record");
            return Ok(());
        }

        let lock = self.table_lock(table);
        let _guard = lock.lock();

        let write = || -> Result<bool, StorageError> {
            let mut file = OpenOptions::new()
                .read(true)
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| StorageError::io(table, e))?;
            let len = file.metadata().map_err(|e| StorageError::io(table, e))?.len();
            let is_new = len == 0;

            let mut bytes = Vec::new();
            if !is_new && !Self::ends_with_newline(&mut file).map_err(|e| StorageError::io(table, e))? {
                // Hand-edited file without a final line break.
                bytes.push(b'\n');
            }
            bytes.extend(Self::encode_row(table, record, is_new)?);

            file.write_all(&bytes)
                .and_then(|()| file.sync_data())
                .map_err(|e| StorageError::io(table, e))?;
            Ok(is_new)
        };
        let is_new = write().inspect_err(|e| {
            tracing::warn!(table, error = %e, "[dm-01] Failed to append record");
        })?;

        tracing::debug!(table, created = is_new, "[dm-01] Appended record");
        Ok(())
    }
}
