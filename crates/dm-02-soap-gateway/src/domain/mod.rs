//! Domain types for the SOAP Gateway.
//!
//! This module contains the request types, configuration, error handling and
//! the service/method classification.

pub mod config;
pub mod error;
pub mod methods;
pub mod types;

// Re-exports for convenience
pub use config::{EndpointsConfig, GatewayConfig, HttpConfig, LimitsConfig, StorageConfig};
pub use error::{ApiError, ApiResult, GatewayError};
pub use methods::{MethodKind, ServiceKind};
pub use types::{Params, SoapRequest};
