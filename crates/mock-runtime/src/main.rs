//! # Desktop Management Mock Backend
//!
//! Stands in for the ClassicMapper and ClassicInventory SOAP services so
//! clients can be exercised without the real backend.
//!
//! ## Startup
//!
//! 1. Logging (`RUST_LOG`, default `info`)
//! 2. Configuration from `DM_*` environment variables
//! 3. CSV record store under the data directory
//! 4. HTTP server until Ctrl+C

use std::sync::Arc;

use anyhow::{Context, Result};
use dm_01_record_store::CsvTableStore;
use dm_02_soap_gateway::SoapGatewayService;
use tracing::{info, warn};

use mock_runtime::{init_tracing, load_config, log_banner};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = load_config();
    log_banner(&config);

    let store = CsvTableStore::open(&config.storage.data_dir).with_context(|| {
        format!(
            "failed to open data directory {}",
            config.storage.data_dir.display()
        )
    })?;

    let mut service = SoapGatewayService::new(config, Arc::new(store))?;
    let addr = service.start().await?;
    info!(%addr, "Mock backend is running. Press Ctrl+C to stop.");

    service
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Ctrl+C handler failed, shutting down");
            }
        })
        .await?;

    Ok(())
}
