//! Built-in handlers that config files can bind routes to.
//!
//! - `echo`: JSON description of what the route matched
//! - `ok`: plain-text liveness reply

use axum::http::StatusCode;
use serde::Serialize;

use crate::http::{RouteRequest, RouteResponse};
use crate::routing::{HandlerRegistry, PathParameters};

#[derive(Debug, Serialize)]
pub struct EchoReport<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub params: &'a PathParameters,
    pub accept: &'a str,
    pub body_bytes: usize,
    pub request_id: Option<&'a str>,
}

/// Describe the matched request as JSON.
pub fn echo(request: &RouteRequest<'_>, response: &mut RouteResponse<'_>) {
    let report = EchoReport {
        method: request.method().as_str(),
        path: request.path(),
        params: request.path_parameters(),
        accept: response.accept(),
        body_bytes: request.body().len(),
        request_id: request.request_id(),
    };

    match serde_json::to_vec(&report) {
        Ok(body) => {
            response.set_content_type("application/json");
            response.write_bytes(&body);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode echo report");
            response.write_error(StatusCode::INTERNAL_SERVER_ERROR, "encoding failed");
        }
    }
}

pub fn ok(_request: &RouteRequest<'_>, response: &mut RouteResponse<'_>) {
    response.set_content_type("text/plain; charset=utf-8");
    response.write_str("ok");
}

/// Registry holding every built-in handler.
pub fn builtin_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register("echo", echo);
    registry.register("ok", ok);
    registry
}
