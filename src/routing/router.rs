//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Offer each request to the routes in turn
//! - Report the most specific rejection when no route handles it
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan; first route that handles the request wins
//! - A route that got further decides the status (415 > 405 > 404)
//! - Explicit NotFound for an empty table rather than a silent default

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::Request;
use thiserror::Error;

use crate::config::RouteConfig;
use crate::http::ResponseBuffer;
use crate::routing::dispatch::{DispatchOutcome, RejectReason};
use crate::routing::registry::HandlerRegistry;
use crate::routing::route::Route;

/// Errors building a route table from configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("route {method} {path} refers to unknown handler '{handler}'")]
    UnknownHandler {
        method: String,
        path: String,
        handler: String,
    },
}

/// Ordered set of routes shared by all request tasks.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Arc<Route>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build routes from config, resolving handler names against `registry`.
    pub fn from_config(
        configs: &[RouteConfig],
        registry: &HandlerRegistry,
    ) -> Result<Self, TableError> {
        let mut table = Self::new();
        for config in configs {
            let handler = registry.get(&config.handler).ok_or_else(|| {
                TableError::UnknownHandler {
                    method: config.method.clone(),
                    path: config.path.clone(),
                    handler: config.handler.clone(),
                }
            })?;

            table.add(
                Route::builder(config.method.as_str(), config.path.as_str())
                    .produces(config.produces.as_str())
                    .consumes(config.consumes.as_str())
                    .to_shared(handler),
            );
        }

        tracing::debug!(routes = table.len(), "Route table built");
        Ok(table)
    }

    pub fn add(&mut self, route: Route) {
        self.routes.push(Arc::new(route));
    }

    /// Builder-style [`RouteTable::add`].
    pub fn route(mut self, route: Route) -> Self {
        self.add(route);
        self
    }

    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Offer `request` to each route until one handles it.
    pub fn dispatch(&self, request: &Request<Bytes>, sink: &mut ResponseBuffer) -> DispatchOutcome {
        let mut best = RejectReason::NotFound;

        for route in &self.routes {
            match route.dispatch(request, sink) {
                DispatchOutcome::Handled => {
                    tracing::debug!(
                        route = %route,
                        path = %request.uri().path(),
                        "Request handled"
                    );
                    return DispatchOutcome::Handled;
                }
                DispatchOutcome::Rejected(reason) => best = best.max(reason),
            }
        }

        tracing::debug!(
            method = %request.method(),
            path = %request.uri().path(),
            reason = %best,
            "No route handled request"
        );
        DispatchOutcome::Rejected(best)
    }
}
