//! Middleware stack for the SOAP gateway.
//!
//! Layer order: Request → Tracing → Validation → Handler

pub mod metrics;
pub mod tracing;
pub mod validation;

pub use metrics::{GatewayMetrics, RequestTimer};
pub use tracing::TracingLayer;
pub use validation::ValidationLayer;

use crate::domain::config::GatewayConfig;
use std::sync::Arc;

/// Middleware stack builder
pub struct MiddlewareStack {
    pub tracing: TracingLayer,
    pub validation: ValidationLayer,
}

impl MiddlewareStack {
    /// Create middleware stack from gateway config, sharing `metrics`
    pub fn from_config(config: &GatewayConfig, metrics: Arc<GatewayMetrics>) -> Self {
        Self {
            tracing: TracingLayer::new(),
            validation: ValidationLayer::new(config.limits.clone(), metrics),
        }
    }
}
