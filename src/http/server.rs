//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a single dispatching fallback handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Buffer request bodies up to the configured limit (413 over it, 400 on body errors)
//! - Dispatch requests through the route table
//! - Turn rejections into 404/405/415 responses
//! - Observability (metrics, correlation IDs)

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, FromRequest, Request, State},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RouterConfig;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::http::response::ResponseBuffer;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::routing::{DispatchOutcome, RouteTable};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
    pub max_body_bytes: usize,
}

/// HTTP server hosting a route table.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
    route_count: usize,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and routes.
    pub fn new(config: RouterConfig, table: RouteTable) -> Self {
        let route_count = table.len();
        let state = AppState {
            table: Arc::new(table),
            max_body_bytes: config.limits.max_body_bytes,
        };

        Self {
            router: Self::build_router(state, &config),
            config,
            route_count,
        }
    }

    fn build_router(state: AppState, config: &RouterConfig) -> Router {
        let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get(X_REQUEST_ID)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        });

        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(trace)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The Axum router, for serving elsewhere or driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown_rx` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.route_count,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

/// Offers the buffered request to the route table.
///
/// The `Bytes` extractor enforces `DefaultBodyLimit`: 413 over the limit,
/// 400 when the body stream itself fails.
async fn dispatch_handler(State(state): State<AppState>, request: Request) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();
    let method = parts.method.to_string();

    let body = Bytes::from_request(Request::from_parts(parts.clone(), body), &state).await;
    let bytes = match body {
        Ok(bytes) => bytes,
        Err(rejection) => {
            tracing::warn!(
                error = %rejection,
                status = %rejection.status(),
                limit = state.max_body_bytes,
                "Failed to buffer request body"
            );
            metrics::record_request(&method, rejection.status().as_u16(), start_time);
            return rejection.into_response();
        }
    };

    let request = axum::http::Request::from_parts(parts, bytes);
    let mut sink = ResponseBuffer::new();

    let response = match state.table.dispatch(&request, &mut sink) {
        DispatchOutcome::Handled => sink.into_response(),
        DispatchOutcome::Rejected(reason) => (reason.status(), reason.to_string()).into_response(),
    };

    metrics::record_request(&method, response.status().as_u16(), start_time);
    response
}
