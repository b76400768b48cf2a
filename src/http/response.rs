//! Response view handed to route handlers.
//!
//! # Responsibilities
//! - Buffer the status, headers and body a handler writes
//! - Carry the Accept media type negotiated for the matched route
//! - Convert the buffered output into an HTTP response
//!
//! # Design Decisions
//! - Handlers write into a buffer owned by the caller, never the socket
//! - Status defaults to 200 OK until a handler changes it

use std::io;

use axum::body::Body;
use axum::http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Output sink a handler writes into.
#[derive(Debug, Clone)]
pub struct ResponseBuffer {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ResponseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl Default for ResponseBuffer {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }
}

impl IntoResponse for ResponseBuffer {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// The output sink plus the negotiated Accept media type.
#[derive(Debug)]
pub struct RouteResponse<'a> {
    sink: &'a mut ResponseBuffer,
    accept: String,
}

impl<'a> RouteResponse<'a> {
    pub fn new(sink: &'a mut ResponseBuffer, accept: impl Into<String>) -> Self {
        Self {
            sink,
            accept: accept.into(),
        }
    }

    /// Media type negotiated from the request's Accept header.
    ///
    /// Empty when the client expressed no preference and the route produces anything.
    pub fn accept(&self) -> &str {
        &self.accept
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.sink.status = status;
    }

    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.sink.headers.insert(name, value);
    }

    /// Set Content-Type, ignoring values that are not valid header text.
    pub fn set_content_type(&mut self, media_type: &str) {
        if let Ok(value) = HeaderValue::from_str(media_type) {
            self.insert_header(CONTENT_TYPE, value);
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.sink.body.extend_from_slice(bytes);
    }

    pub fn write_str(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    /// Replace any written output with a plain-text error.
    pub fn write_error(&mut self, status: StatusCode, message: &str) {
        self.sink.status = status;
        self.sink.body.clear();
        self.set_content_type("text/plain; charset=utf-8");
        self.write_str(message);
    }
}

impl io::Write for RouteResponse<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
