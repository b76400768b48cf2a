//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, body buffering)
//!     → routing (RouteTable::dispatch)
//!     → request.rs (request view: request + path parameters)
//!     → response.rs (response view: buffer + negotiated Accept)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, RouteRequest, X_REQUEST_ID};
pub use response::{ResponseBuffer, RouteResponse};
pub use server::HttpServer;
