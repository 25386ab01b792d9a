//! # Ports
//!
//! - `outbound` - `TableStore`, the storage interface the services are given

pub mod outbound;
