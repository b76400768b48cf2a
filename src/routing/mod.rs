//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, Accept, Content-Type)
//!     → router.rs (offer request to each route in order)
//!     → dispatch.rs (path → method → Accept → Content-Type)
//!     → matcher.rs (template and media type matching)
//!     → Return: Handled, or the rejection reason (404/405/415)
//!
//! Route Construction (at startup):
//!     RouteConfig[] / RouteBuilder
//!     → registry.rs (resolve handler names)
//!     → route.rs (split path template into segments once)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime
//! - No regex in the hot path (segment comparison only)
//! - Deterministic: same input always yields the same outcome
//! - First route that handles the request wins

pub mod dispatch;
pub mod matcher;
pub mod registry;
pub mod route;
pub mod router;

pub use dispatch::{DispatchOutcome, RejectReason};
pub use matcher::{
    decode_path, match_path, matches_accept, matches_content_type, negotiate_accept,
    PathParameters, PathTemplate,
};
pub use registry::HandlerRegistry;
pub use route::{Route, RouteBuilder, RouteHandler};
pub use router::{RouteTable, TableError};
