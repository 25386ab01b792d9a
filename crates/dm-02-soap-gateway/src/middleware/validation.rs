//! Request size validation.
//!
//! POST bodies above `max_request_size` are refused with 413 before any
//! XML parsing happens.

use crate::domain::config::LimitsConfig;
use crate::middleware::metrics::GatewayMetrics;
use axum::{
    body::{Body, Bytes},
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::BytesMut;
use futures::StreamExt;
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::warn;

/// Validation layer configuration
#[derive(Clone)]
pub struct ValidationLayer {
    config: Arc<LimitsConfig>,
    metrics: Arc<GatewayMetrics>,
}

impl ValidationLayer {
    pub fn new(config: LimitsConfig, metrics: Arc<GatewayMetrics>) -> Self {
        Self {
            config: Arc::new(config),
            metrics,
        }
    }
}

impl<S> Layer<S> for ValidationLayer {
    type Service = ValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ValidationService {
            inner,
            config: Arc::clone(&self.config),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

/// Validation service
#[derive(Clone)]
pub struct ValidationService<S> {
    inner: S,
    config: Arc<LimitsConfig>,
    metrics: Arc<GatewayMetrics>,
}

impl<S> Service<Request<Body>> for ValidationService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let config = Arc::clone(&self.config);
        let metrics = Arc::clone(&self.metrics);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let max = config.max_request_size;

            // Check content-length header first (fast path)
            if let Some(len) = content_length(&req) {
                if len > max {
                    warn!(size = len, max, "Request too large (from header)");
                    metrics.record_too_large();
                    return Ok(too_large(max));
                }
            }

            if req.method() != Method::POST {
                return inner.call(req).await;
            }

            // Chunked or lying clients: enforce the limit on the body itself
            let (parts, body) = req.into_parts();
            let bytes = match read_limited(body, max).await {
                Ok(bytes) => bytes,
                Err(BodyError::TooLarge) => {
                    warn!(max, "Request too large (from body)");
                    metrics.record_too_large();
                    return Ok(too_large(max));
                }
                Err(BodyError::Read(e)) => {
                    warn!(error = %e, "Failed to read request body");
                    return Ok(unreadable(&e));
                }
            };

            inner.call(Request::from_parts(parts, Body::from(bytes))).await
        })
    }
}

enum BodyError {
    TooLarge,
    Read(axum::Error),
}

/// Collect `body`, stopping as soon as it grows past `max` bytes.
async fn read_limited(body: Body, max: usize) -> Result<Bytes, BodyError> {
    let mut stream = body.into_data_stream();
    let mut buf = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(BodyError::Read)?;
        if buf.len() + chunk.len() > max {
            return Err(BodyError::TooLarge);
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

fn content_length<B>(req: &Request<B>) -> Option<usize> {
    req.headers()
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn too_large(max: usize) -> Response {
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("Request body exceeds {max} bytes"),
    )
        .into_response()
}

fn unreadable(error: &axum::Error) -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("Failed to read request body: {error}"),
    )
        .into_response()
}
