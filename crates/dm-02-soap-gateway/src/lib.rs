//! DM-02 SOAP Gateway - a local stand-in for the ClassicMapper and
//! ClassicInventory SOAP services.
//!
//! Clients built against the real desktop-management backend POST
//! SOAP-wrapped calls here; reads are answered from the Record Store and
//! writes append new records to it.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        SOAP GATEWAY (dm-02)                        │
//! ├───────────────────────────────────────────────────────────────────┤
//! │  POST /ClassicMapper.asmx          POST /ClassicInventory.asmx     │
//! │            │                                  │                    │
//! │  ┌─────────┴──────────────────────────────────┴─────────┐          │
//! │  │          Middleware: Tracing → Validation            │          │
//! │  └──────────────────────────┬───────────────────────────┘          │
//! │                             │                                      │
//! │  ┌──────────────────────────┴───────────────────────────┐          │
//! │  │  codec::decode → MethodRegistry::lookup → handler    │          │
//! │  │                → codec::encode                       │          │
//! │  └──────────────────────────┬───────────────────────────┘          │
//! └─────────────────────────────┼─────────────────────────────────────┘
//!                               │
//!                      TableStore (dm-01)
//! ```
//!
//! # Services
//!
//! - **ClassicMapper**: `TestService`, `GetUserDrives`, `GetUserPrinters`,
//!   `GetUserPersonalFolders`
//! - **ClassicInventory**: `TestService`, `InsertLogonInventory`,
//!   `InsertLogoffInventory`, `InsertActiveDriveMappingsFromInventory`,
//!   `InsertMapperPrinterInventory`,
//!   `InsertActivePersonalFolderMappingsFromInventory`
//!
//! # Usage
//!
//! ```ignore
//! use dm_01_record_store::CsvTableStore;
//! use dm_02_soap_gateway::{GatewayConfig, SoapGatewayService};
//!
//! let config = GatewayConfig::default();
//! let store = Arc::new(CsvTableStore::open(&config.storage.data_dir)?);
//! let mut service = SoapGatewayService::new(config, store)?;
//! service.start().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod codec;
pub mod domain;
pub mod middleware;
pub mod rpc;
pub mod service;

// Re-exports for public API
pub use codec::{decode, encode, extract_result};
pub use domain::config::GatewayConfig;
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use domain::methods::{MethodKind, ServiceKind};
pub use domain::types::{Params, SoapRequest};
pub use middleware::GatewayMetrics;
pub use rpc::{MethodInfo, MethodRegistry, SoapDispatcher, SoapReply};
pub use service::SoapGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
