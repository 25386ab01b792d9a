//! SOAP gateway service - HTTP front door.
//!
//! Serves the two `.asmx` endpoints, a status page on `/` and a JSON
//! health report on `/health`. Handlers run on the blocking pool since
//! the store is synchronous.

use crate::codec::escape_text;
use crate::domain::config::GatewayConfig;
use crate::domain::error::{ApiError, GatewayError};
use crate::domain::methods::ServiceKind;
use crate::middleware::{GatewayMetrics, MiddlewareStack, RequestTimer};
use crate::rpc::SoapDispatcher;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use dm_01_record_store::TableStore;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tracing::{error, info, warn};

type ServerHandle = JoinHandle<std::io::Result<()>>;

/// SOAP gateway service state
pub struct SoapGatewayService {
    config: GatewayConfig,
    dispatcher: Arc<SoapDispatcher>,
    metrics: Arc<GatewayMetrics>,
    local_addr: Option<SocketAddr>,
    server: Option<ServerHandle>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl SoapGatewayService {
    /// Create a new gateway over `store`
    pub fn new(config: GatewayConfig, store: Arc<dyn TableStore>) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self {
            config,
            dispatcher: Arc::new(SoapDispatcher::new(store)),
            metrics: Arc::new(GatewayMetrics::new()),
            local_addr: None,
            server: None,
            shutdown_tx: None,
        })
    }

    /// Bind the listener and start serving in the background.
    ///
    /// Returns the bound address (useful with port 0).
    pub async fn start(&mut self) -> Result<SocketAddr, GatewayError> {
        if self.server.is_some() {
            return Err(GatewayError::Internal("gateway already started".into()));
        }

        let addr = self.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let router = self.router();

        info!(
            addr = %local_addr,
            mapper = %self.config.endpoints.mapper_path,
            inventory = %self.config.endpoints.inventory_path,
            data_dir = %self.config.storage.data_dir.display(),
            "Starting SOAP gateway"
        );

        self.server = Some(tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        }));
        self.shutdown_tx = Some(shutdown_tx);
        self.local_addr = Some(local_addr);

        Ok(local_addr)
    }

    /// Serve until `signal` resolves or the server stops on its own.
    pub async fn run_until<F>(&mut self, signal: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()>,
    {
        let Some(mut handle) = self.server.take() else {
            return Err(GatewayError::Internal("gateway not started".into()));
        };
        tokio::pin!(signal);

        let finished = tokio::select! {
            joined = &mut handle => Some(joined),
            _ = &mut signal => None,
        };

        match finished {
            Some(joined) => {
                error!("SOAP gateway stopped unexpectedly");
                flatten(joined)
            }
            None => {
                info!("Received shutdown signal");
                self.server = Some(handle);
                self.shutdown().await
            }
        }
    }

    /// Trigger graceful shutdown and wait for in-flight requests
    pub async fn shutdown(&mut self) -> Result<(), GatewayError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let result = match self.server.take() {
            Some(handle) => flatten(handle.await),
            None => Ok(()),
        };
        info!("SOAP gateway stopped");
        result
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Address the listener is bound to, once started
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Build the HTTP router
    pub fn router(&self) -> Router {
        let stack = MiddlewareStack::from_config(&self.config, Arc::clone(&self.metrics));
        let state = AppState {
            dispatcher: Arc::clone(&self.dispatcher),
            metrics: Arc::clone(&self.metrics),
            status_page: Arc::from(status_page(&self.config, &self.dispatcher)),
        };

        let middleware = ServiceBuilder::new()
            .layer(stack.tracing)
            .layer(stack.validation);

        Router::new()
            .route(
                self.config.path_for(ServiceKind::Mapper),
                post(handle_mapper).fallback(unsupported_method),
            )
            .route(
                self.config.path_for(ServiceKind::Inventory),
                post(handle_inventory).fallback(unsupported_method),
            )
            .route("/", get(index))
            .route("/health", get(health_check))
            .layer(middleware)
            .layer(DefaultBodyLimit::max(self.config.limits.max_request_size))
            .with_state(state)
    }
}

fn flatten(joined: Result<std::io::Result<()>, tokio::task::JoinError>) -> Result<(), GatewayError> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(GatewayError::Serve(e.to_string())),
        Err(e) => Err(GatewayError::Internal(format!("server task failed: {e}"))),
    }
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    dispatcher: Arc<SoapDispatcher>,
    metrics: Arc<GatewayMetrics>,
    status_page: Arc<str>,
}

async fn handle_mapper(State(state): State<AppState>, body: Bytes) -> Response {
    handle_soap(state, ServiceKind::Mapper, body).await
}

async fn handle_inventory(State(state): State<AppState>, body: Bytes) -> Response {
    handle_soap(state, ServiceKind::Inventory, body).await
}

/// Run one SOAP call on the blocking pool and map the outcome to HTTP
async fn handle_soap(state: AppState, service: ServiceKind, body: Bytes) -> Response {
    let timer = RequestTimer::new(Arc::clone(&state.metrics));
    let dispatcher = Arc::clone(&state.dispatcher);

    let result = tokio::task::spawn_blocking(move || dispatcher.handle(service, &body))
        .await
        .unwrap_or_else(|e| Err(ApiError::internal(format!("handler task failed: {e}"))));

    match result {
        Ok(reply) => {
            timer.finish_ok(reply.kind.is_write());
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/xml; charset=utf-8")],
                reply.envelope,
            )
                .into_response()
        }
        Err(e) => {
            if e.is_client_error() {
                warn!(service = %service, error = %e, "SOAP call rejected");
            } else {
                error!(service = %service, error = %e, "SOAP call failed");
            }
            timer.finish_err(&e);
            e.into_response()
        }
    }
}

async fn unsupported_method(method: Method) -> Response {
    warn!(method = %method, "Unsupported HTTP method on SOAP endpoint");
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("Unsupported HTTP method: {method}"),
    )
        .into_response()
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.status_page.to_string())
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "dm-soap-gateway",
        "version": crate::VERSION,
        "metrics": state.metrics.to_json(),
    }))
}

fn status_page(config: &GatewayConfig, dispatcher: &SoapDispatcher) -> String {
    let services: String = ServiceKind::ALL
        .iter()
        .map(|kind| {
            let registry = dispatcher.registry(*kind);
            let service = registry.service();
            let path = escape_text(config.path_for(service));
            let methods: String = registry
                .names()
                .into_iter()
                .filter_map(|name| registry.lookup(name).ok())
                .map(|info| {
                    format!(
                        "\n                <li><code>{}</code>: {}</li>",
                        info.name,
                        escape_text(info.description)
                    )
                })
                .collect();
            format!(
                "\n            <li><a href=\"{path}\">{path}</a> ({} Service)\n                <ul>{methods}\n                </ul>\n            </li>",
                service.name()
            )
        })
        .collect();
    let data_dir = config.storage.data_dir.display().to_string();

    format!(
        r#"
    <html>
    <head><title>Mock Desktop Management Backend</title></head>
    <body>
        <h1>Desktop Management Mock Backend Server</h1>
        <p>Status: <strong style="color: green;">Running</strong></p>
        <h2>Available Services:</h2>
        <ul>{services}
        </ul>
        <h2>Data Storage:</h2>
        <p>CSV files in: <code>{}</code></p>
        <h2>DNS Configuration:</h2>
        <p>Point the backend host name the clients are configured with to this server's IP address (listening on <code>{}</code>)</p>
    </body>
    </html>
    "#,
        escape_text(&data_dir),
        config.http_addr()
    )
}
