//! # Mock Runtime
//!
//! Wiring for the `mock-runtime` binary: environment configuration, logging
//! setup and the startup banner.
//!
//! ## Environment
//!
//! | Variable | Effect | Default |
//! |----------|--------|---------|
//! | `DM_HTTP_HOST` | Bind address | `0.0.0.0` |
//! | `DM_HTTP_PORT` | Bind port | `80` |
//! | `DM_DATA_DIR` | Directory holding the CSV tables | `./Data` |
//! | `RUST_LOG` | Log filter | `info` |

use std::path::PathBuf;

use dm_02_soap_gateway::{GatewayConfig, ServiceKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub const ENV_HTTP_HOST: &str = "DM_HTTP_HOST";
pub const ENV_HTTP_PORT: &str = "DM_HTTP_PORT";
pub const ENV_DATA_DIR: &str = "DM_DATA_DIR";

/// Install the global fmt subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Load configuration from the process environment.
pub fn load_config() -> GatewayConfig {
    load_config_from(|name| std::env::var(name).ok())
}

/// Load configuration from `lookup`; unparsable values are logged and ignored.
pub fn load_config_from<F>(lookup: F) -> GatewayConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = GatewayConfig::default();

    if let Some(host) = lookup(ENV_HTTP_HOST) {
        match host.trim().parse() {
            Ok(addr) => config.http.host = addr,
            Err(_) => warn!(value = %host, "{ENV_HTTP_HOST} is not an IP address, ignoring"),
        }
    }

    if let Some(port) = lookup(ENV_HTTP_PORT) {
        match port.trim().parse() {
            Ok(p) => config.http.port = p,
            Err(_) => warn!(value = %port, "{ENV_HTTP_PORT} is not a valid port, ignoring"),
        }
    }

    if let Some(dir) = lookup(ENV_DATA_DIR) {
        if dir.trim().is_empty() {
            warn!("{ENV_DATA_DIR} is empty, ignoring");
        } else {
            config.storage.data_dir = PathBuf::from(dir);
        }
    }

    config
}

/// Log the startup banner.
pub fn log_banner(config: &GatewayConfig) {
    info!("Desktop Management Mock Backend Server");
    info!(data_dir = %config.storage.data_dir.display(), "Data directory");
    for service in ServiceKind::ALL {
        info!(
            service = service.name(),
            path = config.path_for(service),
            "Serving"
        );
    }
    info!("Point the clients' backend host name at this server");
}
