//! Request counters, exported as JSON on `/health`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::domain::error::ApiError;

/// SOAP gateway metrics
#[derive(Debug, Default)]
pub struct GatewayMetrics {
    // Request counters
    pub requests_total: AtomicU64,
    pub requests_success: AtomicU64,

    // Failures by kind
    pub malformed_requests: AtomicU64,
    pub unknown_methods: AtomicU64,
    pub storage_errors: AtomicU64,
    pub internal_errors: AtomicU64,
    pub rejected_too_large: AtomicU64,

    // Successful insert calls
    pub write_requests_total: AtomicU64,

    // Latency tracking
    pub total_latency_ms: AtomicU64,
    pub request_count_for_latency: AtomicU64,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful call
    pub fn record_success(&self, is_write: bool, latency_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.requests_success.fetch_add(1, Ordering::Relaxed);
        if is_write {
            self.write_requests_total.fetch_add(1, Ordering::Relaxed);
        }
        self.record_latency(latency_ms);
    }

    /// Record a failed call
    pub fn record_error(&self, error: &ApiError, latency_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        let counter = match error {
            ApiError::MalformedRequest(_) => &self.malformed_requests,
            ApiError::UnknownMethod { .. } => &self.unknown_methods,
            ApiError::Storage(_) => &self.storage_errors,
            ApiError::Internal(_) => &self.internal_errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.record_latency(latency_ms);
    }

    /// Record a body rejected by the size limit
    pub fn record_too_large(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.rejected_too_large.fetch_add(1, Ordering::Relaxed);
    }

    fn record_latency(&self, latency_ms: u64) {
        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
        self.request_count_for_latency
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Get average latency in ms
    pub fn average_latency_ms(&self) -> f64 {
        let total = self.total_latency_ms.load(Ordering::Relaxed);
        let count = self.request_count_for_latency.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Export metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "requests": {
                "total": self.requests_total.load(Ordering::Relaxed),
                "success": self.requests_success.load(Ordering::Relaxed),
                "writes": self.write_requests_total.load(Ordering::Relaxed),
            },
            "errors": {
                "malformed": self.malformed_requests.load(Ordering::Relaxed),
                "unknown_method": self.unknown_methods.load(Ordering::Relaxed),
                "storage": self.storage_errors.load(Ordering::Relaxed),
                "internal": self.internal_errors.load(Ordering::Relaxed),
                "too_large": self.rejected_too_large.load(Ordering::Relaxed),
            },
            "latency": {
                "average_ms": self.average_latency_ms(),
            }
        })
    }
}

/// Request timing helper
pub struct RequestTimer {
    start: Instant,
    metrics: Arc<GatewayMetrics>,
}

impl RequestTimer {
    pub fn new(metrics: Arc<GatewayMetrics>) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn finish_ok(self, is_write: bool) {
        let latency_ms = self.elapsed_ms();
        self.metrics.record_success(is_write, latency_ms);
    }

    pub fn finish_err(self, error: &ApiError) {
        let latency_ms = self.elapsed_ms();
        self.metrics.record_error(error, latency_ms);
    }
}
