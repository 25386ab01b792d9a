//! # Record Store (dm-01)
//!
//! The persistence layer of the desktop-management mock. Data lives in flat,
//! named tables of string records: query tables (`drives`, `printers`,
//! `personal_folders`) are maintained by hand and only read, event and
//! inventory tables (`sessions`, `inventory_*`) are only appended to.
//!
//! ## Table Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Stored order | `load` returns records in on-disk order |
//! | Read-only reads | `load` never mutates a table |
//! | Missing tables | `load` of an unknown table is empty, never an error |
//! | Whole-record appends | A concurrent `load` never sees a partial record |
//! | Implicit creation | The first `append` creates the table with a header |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - `Record`, table names, error types
//! - `ports/` - The `TableStore` trait the gateway depends on
//! - `adapters/` - In-memory and CSV-file implementations
//!
//! ## Usage
//!
//! ```ignore
//! use dm_01_record_store::{tables, CsvTableStore, Record, TableStore};
//!
//! let store = CsvTableStore::open("./Data")?;
//! let record: Record = [("HostName", "WKS01"), ("UncPath", r"\\srv\p1")]
//!     .into_iter()
//!     .collect();
//! store.append(tables::PRINTERS, &record)?;
//! let printers = store.load(tables::PRINTERS)?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::storage::{CsvTableStore, InMemoryTableStore};
pub use domain::entities::{tables, Record};
pub use domain::errors::StorageError;
pub use ports::outbound::TableStore;
