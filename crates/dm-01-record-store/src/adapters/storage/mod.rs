//! Storage Adapters
//!
//! Implementations of the `TableStore` trait.

mod csv_file;
mod memory;

pub use csv_file::CsvTableStore;
pub use memory::InMemoryTableStore;
