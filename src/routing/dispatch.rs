//! Dispatch of one request against one route.
//!
//! # Decision Order
//! ```text
//! path template matches?        no → Rejected(NotFound)             404
//! method equal?                 no → Rejected(MethodNotAllowed)     405
//! Accept negotiable?            no → Rejected(UnsupportedMediaType) 415
//! POST/PUT: Content-Type ok?    no → Rejected(UnsupportedMediaType) 415
//! invoke handler                   → Handled
//! ```
//!
//! # Design Decisions
//! - Cheapest and most common rejections are checked first
//! - Every rejection is a value, never an error
//! - No state survives the call; parameters are allocated per dispatch
//! - The core never writes a body for a rejection

use std::borrow::Cow;
use std::fmt;

use axum::body::Bytes;
use axum::http::header::{HeaderName, ACCEPT, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};

use crate::http::{ResponseBuffer, RouteRequest, RouteResponse};
use crate::routing::matcher::{decode_path, matches_content_type, negotiate_accept};
use crate::routing::route::Route;

/// Why a route refused a request.
///
/// Ordered by how far the request got through the decision sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RejectReason {
    NotFound,
    MethodNotAllowed,
    UnsupportedMediaType,
}

impl RejectReason {
    pub fn status(self) -> StatusCode {
        match self {
            RejectReason::NotFound => StatusCode::NOT_FOUND,
            RejectReason::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RejectReason::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status();
        write!(
            f,
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        )
    }
}

/// Result of dispatching a request against a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler was invoked.
    Handled,
    Rejected(RejectReason),
}

impl DispatchOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, DispatchOutcome::Handled)
    }

    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            DispatchOutcome::Handled => None,
            DispatchOutcome::Rejected(reason) => Some(*reason),
        }
    }
}

/// Methods whose body is subject to Content-Type negotiation.
pub fn carries_body(method: &Method) -> bool {
    method == Method::POST || method == Method::PUT
}

impl Route {
    /// Match `request` against this route and invoke the handler on success.
    ///
    /// The handler writes into `sink`. On rejection `sink` is left untouched.
    pub fn dispatch(&self, request: &Request<Bytes>, sink: &mut ResponseBuffer) -> DispatchOutcome {
        let path = decode_path(request.uri().path());
        let Some(params) = self.template.matches(&path) else {
            return self.reject(RejectReason::NotFound);
        };

        let method = request.method();
        if self.method != method.as_str() {
            return self.reject(RejectReason::MethodNotAllowed);
        }

        let accept = header_str(request, ACCEPT);
        let Some(negotiated) = negotiate_accept(&self.produces, &accept) else {
            return self.reject(RejectReason::UnsupportedMediaType);
        };

        if carries_body(method)
            && !matches_content_type(&self.consumes, &header_str(request, CONTENT_TYPE))
        {
            return self.reject(RejectReason::UnsupportedMediaType);
        }

        tracing::trace!(route = %self, accept = %negotiated, "Invoking route handler");

        let route_request = RouteRequest::new(request, params);
        let mut route_response = RouteResponse::new(sink, negotiated);
        self.handler.handle(&route_request, &mut route_response);

        DispatchOutcome::Handled
    }

    fn reject(&self, reason: RejectReason) -> DispatchOutcome {
        tracing::trace!(route = %self, reason = %reason, "Route rejected request");
        DispatchOutcome::Rejected(reason)
    }
}

// A missing header reads as empty; opaque bytes become U+FFFD so they never match.
fn header_str(request: &Request<Bytes>, name: HeaderName) -> Cow<'_, str> {
    match request.headers().get(name) {
        Some(value) => String::from_utf8_lossy(value.as_bytes()),
        None => Cow::Borrowed(""),
    }
}
