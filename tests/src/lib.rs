//! # Desktop Management Mock Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Codec and query throughput
//! └── src/integration/  # End-to-end flows through the HTTP router
//!     ├── mapper_flows.rs
//!     └── inventory_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p dm-tests
//!
//! # By service
//! cargo test -p dm-tests integration::mapper_flows
//! cargo test -p dm-tests integration::inventory_flows
//!
//! # Benchmarks
//! cargo bench -p dm-tests
//! ```

pub mod integration;
