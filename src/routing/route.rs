//! Route definitions.
//!
//! # Responsibilities
//! - Bind a method, path template and media types to a handler
//! - Preprocess the path template once, at construction
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc, no locks)
//! - Handler is any `RouteHandler`, closures included
//! - Empty or `*/*` media type lists mean "any"

use std::fmt;
use std::sync::Arc;

use crate::http::{RouteRequest, RouteResponse};
use crate::routing::matcher::PathTemplate;

/// Something that can serve a matched request.
pub trait RouteHandler: Send + Sync {
    fn handle(&self, request: &RouteRequest<'_>, response: &mut RouteResponse<'_>);
}

impl<F> RouteHandler for F
where
    F: Fn(&RouteRequest<'_>, &mut RouteResponse<'_>) + Send + Sync,
{
    fn handle(&self, request: &RouteRequest<'_>, response: &mut RouteResponse<'_>) {
        self(request, response)
    }
}

/// A method + path template + media types bound to a handler.
#[derive(Clone)]
pub struct Route {
    pub(crate) method: String,
    pub(crate) template: PathTemplate,
    pub(crate) produces: String,
    pub(crate) consumes: String,
    pub(crate) handler: Arc<dyn RouteHandler>,
}

impl Route {
    /// Create a route that produces and consumes any media type.
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        handler: impl RouteHandler + 'static,
    ) -> Self {
        Self::builder(method, path).to(handler)
    }

    pub fn builder(method: impl Into<String>, path: impl Into<String>) -> RouteBuilder {
        RouteBuilder {
            method: method.into(),
            path: path.into(),
            produces: String::new(),
            consumes: String::new(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        self.template.template()
    }

    pub fn path_segments(&self) -> &[String] {
        self.template.segments()
    }

    pub fn produces(&self) -> &str {
        &self.produces
    }

    pub fn consumes(&self) -> &str {
        &self.consumes
    }

    pub fn handler(&self) -> &Arc<dyn RouteHandler> {
        &self.handler
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.template.template())
            .field("produces", &self.produces)
            .field("consumes", &self.consumes)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.template.template())
    }
}

/// Fluent construction of a [`Route`], finished by [`RouteBuilder::to`].
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    method: String,
    path: String,
    produces: String,
    consumes: String,
}

impl RouteBuilder {
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Comma-joined media types the handler can write, e.g. `application/json,application/xml`.
    pub fn produces(mut self, media_types: impl Into<String>) -> Self {
        self.produces = media_types.into();
        self
    }

    /// Comma-joined media types the handler can read from a POST or PUT body.
    pub fn consumes(mut self, media_types: impl Into<String>) -> Self {
        self.consumes = media_types.into();
        self
    }

    /// Bind the handler and build the route.
    pub fn to(self, handler: impl RouteHandler + 'static) -> Route {
        self.to_shared(Arc::new(handler))
    }

    /// Bind an already shared handler and build the route.
    pub fn to_shared(self, handler: Arc<dyn RouteHandler>) -> Route {
        Route {
            method: self.method,
            template: PathTemplate::new(self.path),
            produces: self.produces,
            consumes: self.consumes,
            handler,
        }
    }
}
