//! Request view handed to route handlers.
//!
//! # Responsibilities
//! - Carry the incoming request together with its bound path parameters
//! - Expose header, path parameter and query parameter lookups
//! - Generate a unique request ID (UUID v4) per incoming request
//!
//! # Design Decisions
//! - The view borrows the request; parameters are owned per dispatch
//! - Request ID added as early as possible for tracing
//! - Query parameters are form-decoded (`%XX` and `+`) on lookup

use std::borrow::Cow;

use axum::body::Bytes;
use axum::http::header::{AsHeaderName, HeaderValue};
use axum::http::{Method, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use url::form_urlencoded;
use uuid::Uuid;

use crate::routing::PathParameters;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// A matched request: the incoming request plus its path parameters.
#[derive(Debug)]
pub struct RouteRequest<'a> {
    inner: &'a Request<Bytes>,
    path_params: PathParameters,
}

impl<'a> RouteRequest<'a> {
    pub fn new(inner: &'a Request<Bytes>, path_params: PathParameters) -> Self {
        Self { inner, path_params }
    }

    /// The incoming request.
    pub fn inner(&self) -> &'a Request<Bytes> {
        self.inner
    }

    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn path(&self) -> &str {
        self.inner.uri().path()
    }

    /// Header value as a string, if present and visible ASCII.
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.inner
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    /// The request ID assigned by the server, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.header(X_REQUEST_ID)
    }

    /// Value bound to `{name}` in the route template.
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    pub fn path_parameters(&self) -> &PathParameters {
        &self.path_params
    }

    /// First decoded value of `name` in the query string.
    pub fn query_parameter(&self, name: &str) -> Option<Cow<'a, str>> {
        let query = self.inner.uri().query()?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }
}

/// Generates UUID v4 request IDs for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let value = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::ACCEPT;

    fn request(uri: &str) -> Request<Bytes> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(ACCEPT, "application/json")
            .header(X_REQUEST_ID, "abc-123")
            .body(Bytes::from_static(b"payload"))
            .unwrap()
    }

    #[test]
    fn test_request_accessors() {
        let req = request("/users/42?verbose=true");
        let mut params = PathParameters::new();
        params.insert("id".to_string(), "42".to_string());
        let view = RouteRequest::new(&req, params);

        assert_eq!(view.method(), Method::POST);
        assert_eq!(view.path(), "/users/42");
        assert_eq!(view.header(ACCEPT), Some("application/json"));
        assert_eq!(view.header("accept"), Some("application/json"));
        assert_eq!(view.header("content-type"), None);
        assert_eq!(view.request_id(), Some("abc-123"));
        assert_eq!(view.path_parameter("id"), Some("42"));
        assert_eq!(view.path_parameter("name"), None);
        assert_eq!(view.path_parameters().len(), 1);
        assert_eq!(view.body().as_ref(), b"payload");
    }

    #[test]
    fn test_query_parameter() {
        let req = request("/search?q=rust&page=2&q=again&flag");
        let view = RouteRequest::new(&req, PathParameters::new());

        assert_eq!(view.query_parameter("q").as_deref(), Some("rust"));
        assert_eq!(view.query_parameter("page").as_deref(), Some("2"));
        assert_eq!(view.query_parameter("flag").as_deref(), Some(""));
        assert_eq!(view.query_parameter("missing"), None);

        let req = request("/search");
        let view = RouteRequest::new(&req, PathParameters::new());
        assert_eq!(view.query_parameter("q"), None);
    }

    #[test]
    fn test_query_parameter_decoded() {
        let req = request("/users/a%20b?q=hello%20world&r=a+b&caf%C3%A9=1");
        let view = RouteRequest::new(&req, PathParameters::new());

        assert_eq!(view.query_parameter("q").as_deref(), Some("hello world"));
        assert_eq!(view.query_parameter("r").as_deref(), Some("a b"));
        assert_eq!(view.query_parameter("café").as_deref(), Some("1"));
    }

    #[test]
    fn test_make_request_uuid() {
        let req = request("/");
        let id = MakeRequestUuid.make_request_id(&req).unwrap();
        let value = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(value).is_ok());
    }
}
