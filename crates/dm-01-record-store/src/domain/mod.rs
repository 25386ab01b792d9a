//! # Domain Layer
//!
//! Pure types for the Record Store. No I/O happens here.
//!
//! - `entities` - `Record` and the well-known table names
//! - `errors` - `StorageError`

pub mod entities;
pub mod errors;
