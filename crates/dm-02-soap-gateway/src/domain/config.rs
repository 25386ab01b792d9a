//! Gateway configuration with validation.
//!
//! Only the bind address and port are meant to be tuned per deployment; the
//! endpoint paths default to the mocked service's `.asmx` paths.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::domain::methods::ServiceKind;

/// Paths the gateway serves itself, which endpoints may not shadow.
const RESERVED_PATHS: [&str; 2] = ["/", "/health"];

/// Main gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// SOAP endpoint paths
    pub endpoints: EndpointsConfig,
    /// Table storage location
    pub storage: StorageConfig,
    /// Request validation limits
    pub limits: LimitsConfig,
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mapper = &self.endpoints.mapper_path;
        let inventory = &self.endpoints.inventory_path;

        for path in [mapper, inventory] {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidPath(format!(
                    "{path:?} must start with '/'"
                )));
            }
            if RESERVED_PATHS.contains(&path.as_str()) {
                return Err(ConfigError::InvalidPath(format!("{path:?} is reserved")));
            }
        }

        if mapper == inventory {
            return Err(ConfigError::DuplicatePaths);
        }

        if self.limits.max_request_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_request_size cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }

    /// Endpoint path for `service`
    pub fn path_for(&self, service: ServiceKind) -> &str {
        match service {
            ServiceKind::Mapper => &self.endpoints.mapper_path,
            ServiceKind::Inventory => &self.endpoints.inventory_path,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 80, what the mocked clients expect)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 80,
        }
    }
}

/// SOAP endpoint paths
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub mapper_path: String,
    pub inventory_path: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            mapper_path: ServiceKind::Mapper.default_path().to_string(),
            inventory_path: ServiceKind::Inventory.default_path().to_string(),
        }
    }
}

/// Table storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one CSV file per table
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./Data"),
        }
    }
}

/// Request limits configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max request body size in bytes (default: 1MB)
    pub max_request_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_size: 1024 * 1024, // 1MB
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Both services mapped to the same path
    #[error("mapper and inventory endpoints share a path")]
    DuplicatePaths,
    /// Endpoint path unusable
    #[error("invalid endpoint path: {0}")]
    InvalidPath(String),
    /// Invalid size limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
}
