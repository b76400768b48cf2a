//! Request routing core for HTTP services.
//!
//! Routes bind a method, a `{param}` path template and the media types they
//! produce and consume to a handler. Each request is matched path first,
//! then method, then Accept, then (for POST/PUT) Content-Type, and either
//! reaches the handler or is rejected with 404, 405 or 415.

pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use http::{HttpServer, RouteRequest, RouteResponse};
pub use lifecycle::Shutdown;
pub use routing::{DispatchOutcome, RejectReason, Route, RouteHandler, RouteTable};
